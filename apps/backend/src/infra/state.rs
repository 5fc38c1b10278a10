use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbSource {
    None,
    Url(String),
    Existing(DatabaseConnection),
}

/// Assembles `AppState` for both the binary and the tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: DbSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: DbSource::None,
        }
    }

    /// Connect to `url` and migrate it during `build`.
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db = DbSource::Url(url.into());
        self
    }

    /// Use an already-migrated connection as is.
    pub fn with_connection(mut self, conn: DatabaseConnection) -> Self {
        self.db = DbSource::Existing(conn);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db {
            DbSource::None => Ok(AppState::without_db(self.security_config)),
            DbSource::Url(url) => {
                let conn = bootstrap_db(&url).await?;
                Ok(AppState::new(conn, self.security_config))
            }
            DbSource::Existing(conn) => Ok(AppState::new(conn, self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
