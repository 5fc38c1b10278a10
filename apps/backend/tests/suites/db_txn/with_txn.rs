use backend_test_support::unique_helpers::{unique_str, unique_user_id};
use tankard_backend::db::require_db;
use tankard_backend::db::txn::with_txn;
use tankard_backend::errors::ErrorCode;
use tankard_backend::repos::games as games_repo;
use tankard_backend::repos::games::GameCreate;
use tankard_backend::AppError;
use uuid::Uuid;

use crate::support::build_test_state;
use crate::support::test_state::build_test_state_without_db;

#[tokio::test]
async fn ok_commits() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user_id = unique_user_id();
    let game_id = Uuid::new_v4();
    let name = unique_str("Kingdomino");

    let created = with_txn(&state, move |txn| {
        Box::pin(async move {
            Ok(games_repo::create_game(txn, GameCreate::new(game_id, user_id, name)).await?)
        })
    })
    .await?;
    assert_eq!(created.id, game_id);

    let stored = games_repo::find_owned(require_db(&state)?, user_id, game_id).await?;
    assert_eq!(stored, Some(created));
    Ok(())
}

#[tokio::test]
async fn err_rolls_back_earlier_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user_id = unique_user_id();
    let game_id = Uuid::new_v4();

    let result: Result<(), AppError> = with_txn(&state, move |txn| {
        Box::pin(async move {
            games_repo::create_game(txn, GameCreate::new(game_id, user_id, "Splendor")).await?;
            Err(AppError::internal("boom after insert"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);

    let stored = games_repo::find_owned(require_db(&state)?, user_id, game_id).await?;
    assert!(stored.is_none(), "insert must not survive the rollback");
    Ok(())
}

#[tokio::test]
async fn without_db_is_unavailable() -> Result<(), AppError> {
    let state = build_test_state_without_db().await?;

    let result: Result<u8, AppError> =
        with_txn(&state, |_txn| Box::pin(async move { Ok(1) })).await;

    assert!(matches!(result, Err(AppError::DbUnavailable)));
    Ok(())
}
