use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Shared per-process state handed to every worker through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` only in tests that never touch the database.
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    pub fn without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }
}
