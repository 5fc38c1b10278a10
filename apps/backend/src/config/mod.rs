//! Startup configuration, read once from the environment.

pub mod db;

use std::env;

use crate::error::AppError;
use crate::middleware::cors::allowed_origins;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let must = |name: &str| {
            get(name).ok_or_else(|| {
                AppError::config(format!("Required environment variable '{name}' is not set"))
            })
        };

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };
        let jwt_secret = must("BACKEND_JWT_SECRET")?;
        let database_url = must("DATABASE_URL")?;
        db::DbKind::from_url(&database_url)?;
        let cors_origins = allowed_origins(&get("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Self {
            host,
            port,
            jwt_secret,
            database_url,
            cors_origins,
        })
    }
}
