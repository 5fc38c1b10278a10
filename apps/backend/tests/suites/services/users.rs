use backend_test_support::unique_helpers::{unique_str, unique_user_id};
use tankard_backend::db::require_db;
use tankard_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use tankard_backend::services::users::UserService;

use crate::support::build_test_state;

#[tokio::test]
async fn signup_stores_a_hash_not_the_password() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = UserService::new();
    let username = unique_str("u");

    let user = service
        .signup(db, &username, "open sesame".to_string())
        .await?;

    assert_eq!(user.username, username.to_lowercase());
    assert_ne!(user.password_hash, "open sesame");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let found = service.profile(db, user.id).await?;
    assert_eq!(found, user);
    Ok(())
}

#[tokio::test]
async fn signin_matches_only_the_right_password() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = UserService::new();
    let username = unique_str("u");

    let user = service
        .signup(db, &username, "open sesame".to_string())
        .await?;

    let ok = service
        .signin(db, &username, "open sesame".to_string())
        .await?;
    assert_eq!(ok.map(|u| u.id), Some(user.id));

    let wrong = service
        .signin(db, &username, "open sesamE".to_string())
        .await?;
    assert!(wrong.is_none());

    let unknown = service
        .signin(db, &unique_str("u"), "open sesame".to_string())
        .await?;
    assert!(unknown.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_is_a_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = UserService::new();
    let username = unique_str("u");

    service
        .signup(db, &username, "first password".to_string())
        .await?;
    let err = service
        .signup(db, &username.to_uppercase(), "second password".to_string())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UserAlreadyExists, _)
    ));
    Ok(())
}

#[tokio::test]
async fn profile_of_unknown_id_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = UserService::new()
        .profile(db, unique_user_id())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    Ok(())
}
