//! Bearer-token authentication for the `/api/games` and `/api/profile` scopes.
//!
//! Verifies `Authorization: Bearer <jwt>` and stores the `Claims` in the
//! request extensions for `CurrentUser`. Anything else is answered here with
//! a 401 problem response carrying `WWW-Authenticate: Bearer`; it is rendered
//! while `RequestTrace`'s trace scope is active, so its `trace_id` matches
//! `x-trace-id`.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match bearer_token(req.headers().get(header::AUTHORIZATION)) {
            Ok(token) => token,
            Err(err) => return reject(req, err),
        };

        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return reject(req, AppError::internal("AppState not available"));
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => reject(req, err),
        }
    }
}

/// Short-circuit with the problem response for `err`.
fn reject<B: 'static>(
    req: ServiceRequest,
    err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    security::auth_rejected(err.code().as_str(), req.path(), None);
    let res = req.into_response(err.error_response()).map_into_right_body();
    Box::pin(ready(Ok(res)))
}

/// The token from a `Bearer` authorization header. The scheme match is case
/// insensitive; an absent, non-ASCII or empty header is a missing bearer.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<String, AppError> {
    let raw = value
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
