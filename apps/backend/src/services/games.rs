//! Business rules for a user's games list.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::games::{self as games_repo, Game, GameCreate, GameUpdate};

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// A game to add, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Changes to one existing game. `description`: `None` = keep,
/// `Some(None)` = clear, `Some(Some(_))` = replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameChanges {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Game domain service.
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<Game>, DomainError> {
        games_repo::list_for_user(conn, user_id).await
    }

    /// Insert every game for `user_id`. The whole batch is validated before
    /// the first insert; callers run this inside one transaction.
    pub async fn create_many<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
        batch: Vec<NewGame>,
    ) -> Result<Vec<Game>, DomainError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::with_capacity(batch.len());
        let mut rows = Vec::with_capacity(batch.len());
        for game in batch {
            if !seen.insert(game.id) {
                return Err(DomainError::conflict(
                    ConflictKind::GameAlreadyExists,
                    format!("Game {} appears more than once in the batch", game.id),
                ));
            }
            let name = normalize_name(&game.name)?;
            let mut dto = GameCreate::new(game.id, user_id, name);
            if let Some(description) = normalize_description(game.description)? {
                dto = dto.with_description(description);
            }
            rows.push(dto);
        }

        let mut created = Vec::with_capacity(rows.len());
        for dto in rows {
            debug!(game_id = %dto.id, "creating game");
            created.push(games_repo::create_game(conn, dto).await?);
        }

        info!(%user_id, count = created.len(), "games created");
        Ok(created)
    }

    /// Apply every change for `user_id`. Fails with `GAME_NOT_FOUND` before
    /// writing anything if any id is not one of the user's games.
    pub async fn update_many<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
        batch: Vec<GameChanges>,
    ) -> Result<Vec<Game>, DomainError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut updates = Vec::with_capacity(batch.len());
        for changes in batch {
            let mut dto = GameUpdate::new(changes.id, user_id);
            if let Some(name) = changes.name {
                dto = dto.with_name(normalize_name(&name)?);
            }
            if let Some(description) = changes.description {
                dto = dto.with_description(normalize_description(description)?);
            }
            updates.push(dto);
        }

        let ids: Vec<Uuid> = updates.iter().map(|dto| dto.id).collect();
        if let Some(missing) = games_repo::unowned_ids(conn, user_id, &ids)
            .await?
            .first()
        {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {missing} not found"),
            ));
        }

        let mut updated = Vec::with_capacity(updates.len());
        for dto in updates {
            debug!(game_id = %dto.id, noop = dto.is_noop(), "updating game");
            updated.push(games_repo::update_game(conn, dto).await?);
        }

        info!(%user_id, count = updated.len(), "games updated");
        Ok(updated)
    }

    /// Delete the user's games among `ids`. Ids that match nothing are
    /// ignored; returns how many rows went away.
    pub async fn delete_many<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: Uuid,
        ids: &[Uuid],
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let removed = games_repo::delete_games(conn, user_id, ids).await?;
        info!(%user_id, requested = ids.len(), removed, "games deleted");
        Ok(removed)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed name; blank or longer than [`MAX_NAME_CHARS`] is invalid.
pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameName,
            "Game name must not be blank",
        ));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameName,
            format!("Game name must be at most {MAX_NAME_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}

/// Blank descriptions are stored as NULL.
pub fn normalize_description(raw: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let description = raw.trim();
    if description.is_empty() {
        return Ok(None);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidGameDescription,
            format!("Game description must be at most {MAX_DESCRIPTION_CHARS} characters"),
        ));
    }
    Ok(Some(description.to_string()))
}
