//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::games_sea as games_adapter;
use crate::entities::games;
use crate::errors::domain::DomainError;

pub use games_adapter::{GameCreate, GameUpdate};

/// A game as the rest of the backend sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<Game>, DomainError> {
    let rows = games_adapter::list_for_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Game::from).collect())
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    game_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_owned(conn, user_id, game_id).await?;
    Ok(game.map(Game::from))
}

/// The ids in `ids` that `user_id` does not own (including ones that do not
/// exist at all), in input order.
pub async fn unowned_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<Uuid>, DomainError> {
    let owned = games_adapter::find_owned_ids(conn, user_id, ids).await?;
    Ok(ids
        .iter()
        .copied()
        .filter(|id| !owned.contains(id))
        .collect())
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn delete_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<u64, DomainError> {
    Ok(games_adapter::delete_games(conn, user_id, ids).await?)
}
