//! SeaORM -> DomainError translation.
//!
//! Adapters return raw `DbErr`; repos call [`map_db_err`] so everything above
//! them speaks `DomainError`, and `AppError` picks it up via `From`.

use sea_orm::DbErr;
use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Prefix of the `DbErr::Custom` message adapters raise for a missing game.
pub const GAME_NOT_FOUND_PREFIX: &str = "GAME_NOT_FOUND:";

pub fn game_not_found(id: Uuid) -> DbErr {
    DbErr::Custom(format!("{GAME_NOT_FOUND_PREFIX}{id}"))
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// `games.id` on SQLite, `games_pkey` on Postgres.
fn is_game_id_conflict(msg: &str) -> bool {
    msg.contains("games.id") || msg.contains("games_pkey")
}

/// `users.username` on SQLite, the unique index name on Postgres.
fn is_username_conflict(msg: &str) -> bool {
    msg.contains("users.username") || msg.contains("ux_users_username")
}

/// Translate a `DbErr` into a `DomainError` with a sanitised detail. The raw
/// driver message is only ever logged, redacted.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::Custom(msg) if msg.starts_with(GAME_NOT_FOUND_PREFIX) => {
            let raw_id = &msg[GAME_NOT_FOUND_PREFIX.len()..];
            return match raw_id.parse::<Uuid>() {
                Ok(game_id) => {
                    warn!(trace_id = %trace_id, %game_id, "Game not found");
                    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
                }
                Err(_) => {
                    warn!(trace_id = %trace_id, raw_error = %Redacted(msg), "Unparseable GAME_NOT_FOUND error");
                    DomainError::not_found(NotFoundKind::Game, "Game not found")
                }
            };
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if is_game_id_conflict(&error_msg) {
            return DomainError::conflict(
                ConflictKind::GameAlreadyExists,
                "A game with this id already exists",
            );
        }
        if is_username_conflict(&error_msg) {
            return DomainError::conflict(
                ConflictKind::UserAlreadyExists,
                "That username is already taken",
            );
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23502") || error_msg.contains("NOT NULL constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Not-null constraint violation");
        return DomainError::validation_other("Required field missing");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
