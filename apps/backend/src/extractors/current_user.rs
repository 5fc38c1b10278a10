use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::error::AppError;

/// The authenticated caller, taken from the claims `JwtExtract` stored in the
/// request extensions. Every games query is scoped to `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl CurrentUser {
    fn from_claims(claims: Option<&Claims>) -> Result<Self, AppError> {
        let claims = claims.ok_or_else(AppError::unauthorized)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::forbidden("Token subject is not a user id"))?;
        Ok(Self { id })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_claims(req.extensions().get::<Claims>()))
    }
}
