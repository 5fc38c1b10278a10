use std::collections::HashSet;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use url::form_urlencoded;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// The `ids` query parameter of a bulk delete, repeated once per id:
/// `?ids=<uuid>&ids=<uuid>`.
///
/// A missing parameter is an empty list. Duplicates collapse; first-seen
/// order is kept. Any malformed id rejects the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameIds(pub Vec<Uuid>);

impl GameIds {
    pub fn parse_query(query: &str) -> Result<Self, AppError> {
        let mut ids: Vec<Uuid> = Vec::new();
        let mut seen: HashSet<Uuid> = HashSet::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key != "ids" {
                continue;
            }
            let id = Uuid::parse_str(value.trim()).map_err(|_| {
                AppError::invalid(
                    ErrorCode::InvalidGameId,
                    format!("Invalid game id: {}", truncate(&value, 64)),
                )
            })?;
            if seen.insert(id) {
                ids.push(id);
            }
        }
        Ok(Self(ids))
    }

    pub fn into_inner(self) -> Vec<Uuid> {
        self.0
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

impl FromRequest for GameIds {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::parse_query(req.query_string()))
    }
}
