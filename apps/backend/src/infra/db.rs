use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector,
};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};

use crate::config::db::{redact_url, DbKind};
use crate::error::AppError;
use crate::logging::pii::Redacted;

const CONNECT_ATTEMPTS: u32 = 5;
const RETRY_INTERVAL_MS: u64 = 500;

/// Pool sizing per backend. An in-memory SQLite database lives and dies with
/// its connection, so that pool is built by [`memory_pool_options`] instead.
fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url.to_owned());
    let (max, min) = match kind {
        DbKind::Postgres => (10, 1),
        DbKind::SqliteFile => (5, 1),
        DbKind::SqliteMemory => (1, 1),
    };
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opts
}

/// Exactly one connection that is never reaped for idleness or age.
fn memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(None)
        .max_lifetime(None)
}

async fn open(url: &str, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::SqliteMemory => {
            let pool = memory_pool_options()
                .connect(url)
                .await
                .map_err(|e| AppError::from(DbErr::Conn(RuntimeErr::SqlxError(e))))?;
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        _ => Database::connect(connect_options(url, kind))
            .await
            .map_err(AppError::from),
    }
}

async fn retry_connection<T, F, Fut>(mut connect_fn: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    interval_ms = RETRY_INTERVAL_MS,
                    error = %Redacted(&e.to_string()),
                    "connection_retry=failed"
                );
                tokio::time::sleep(Duration::from_millis(RETRY_INTERVAL_MS)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open a pool for `url`. Does not run migrations.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let kind = DbKind::from_url(url)?;
    let conn = retry_connection(move || open(url, kind)).await?;

    info!(db = %redact_url(url), kind = ?kind, "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date on the same pool.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Migrations failed: {e}")))?;
    Ok(conn)
}
