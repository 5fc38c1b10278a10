//! Database access helpers for handlers and services.

pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// The connection from `AppState`, or `DB_UNAVAILABLE` when none is configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db.as_ref().ok_or_else(AppError::db_unavailable)
}
