use crate::error::AppError;

/// Which backend a `DATABASE_URL` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    /// Classify a connection URL. Anything other than a Postgres or SQLite
    /// scheme is a configuration error.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(DbKind::Postgres);
        }
        if let Some(rest) = url.strip_prefix("sqlite:") {
            let rest = rest.trim_start_matches("//");
            let path = rest.split('?').next().unwrap_or_default();
            return if path == ":memory:" || rest.contains("mode=memory") {
                Ok(DbKind::SqliteMemory)
            } else if path.is_empty() {
                Err(AppError::config("SQLite URL has no file path"))
            } else {
                Ok(DbKind::SqliteFile)
            };
        }
        Err(AppError::config(format!(
            "Unsupported database URL scheme (expected postgres:// or sqlite:): '{}'",
            redact_url(url)
        )))
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

/// The URL with any password replaced, for logs and error messages.
pub fn redact_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => url.to_string(),
    }
}
