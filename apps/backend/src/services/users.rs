//! Account rules: sign-up, sign-in and profile lookup.
//!
//! Usernames are case-insensitive; they are trimmed and lowercased before they
//! are stored or looked up. Passwords are taken verbatim.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::logging::pii::Redacted;
use crate::repos::users::{self as users_repo, User};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 32;
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MAX_PASSWORD_CHARS: usize = 128;

/// User account service.
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Create an account. A taken username is `UserAlreadyExists`; the unique
    /// index reports the same conflict if two sign-ups race.
    pub async fn signup<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
        password: String,
    ) -> Result<User, DomainError> {
        let username = normalize_username(username)?;
        validate_password(&password)?;

        if users_repo::find_by_username(conn, &username).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::UserAlreadyExists,
                "That username is already taken",
            ));
        }

        let hash = hash_off_thread(password).await?;
        let user = users_repo::create_user(conn, &username, &hash).await?;

        info!(user_id = %user.id, username = %Redacted(&user.username), "user signed up");
        Ok(user)
    }

    /// `None` for an unknown username or a wrong password; callers must not
    /// tell the two apart.
    pub async fn signin<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
        password: String,
    ) -> Result<Option<User>, DomainError> {
        // A name that could never have been registered cannot match.
        let Ok(username) = normalize_username(username) else {
            return Ok(None);
        };

        let Some(user) = users_repo::find_by_username(conn, &username).await? else {
            debug!(username = %Redacted(&username), "signin for unknown user");
            return Ok(None);
        };

        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || {
            verify_password(&password, &stored)
        })
        .await
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("PasswordVerify".into()),
                format!("Password check did not complete: {e}"),
            )
        })?;

        if !matches {
            debug!(user_id = %user.id, "signin with wrong password");
            return Ok(None);
        }

        info!(user_id = %user.id, "user signed in");
        Ok(Some(user))
    }

    /// The account behind an access token. A token can outlive its account;
    /// a missing row is `NotFound(User)`.
    pub async fn profile<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<User, DomainError> {
        users_repo::find_by_id(conn, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

async fn hash_off_thread(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("PasswordHash".into()),
                format!("Password hashing did not complete: {e}"),
            )
        })?
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("PasswordHash".into()),
                format!("Failed to hash password: {e}"),
            )
        })
}

/// Trimmed and lowercased. ASCII letters, digits, `_`, `-` and `.` only.
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let username = raw.trim().to_ascii_lowercase();
    let len = username.chars().count();
    if !(MIN_USERNAME_CHARS..=MAX_USERNAME_CHARS).contains(&len) {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!(
                "Username must be between {MIN_USERNAME_CHARS} and {MAX_USERNAME_CHARS} characters"
            ),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            "Username may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(username)
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&len) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            format!(
                "Password must be between {MIN_PASSWORD_CHARS} and {MAX_PASSWORD_CHARS} characters"
            ),
        ));
    }
    Ok(())
}
