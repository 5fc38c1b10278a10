//! `/api/games`: list, bulk create, bulk update and bulk delete of the
//! caller's games. Mounted behind `JwtExtract`.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameIds, ValidatedJson};
use crate::repos::games::Game;
use crate::services::games::{GameChanges, GameService, NewGame};
use crate::state::app_state::AppState;

/// One element of a POST body. Unknown fields (the client's intent flags)
/// are ignored; a missing name is reported as `INVALID_GAME_NAME`.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One element of a PUT body. `description: null` clears it; an absent
/// `description` leaves it alone.
#[derive(Debug, Deserialize)]
pub struct UpdateGameRequest {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            name: game.name,
            description: game.description,
        }
    }
}

impl From<CreateGameRequest> for NewGame {
    fn from(req: CreateGameRequest) -> Self {
        Self {
            id: req.id,
            name: req.name.unwrap_or_default(),
            description: req.description,
        }
    }
}

impl From<UpdateGameRequest> for GameChanges {
    fn from(req: UpdateGameRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            description: req.description,
        }
    }
}

fn to_responses(games: Vec<Game>) -> Vec<GameResponse> {
    games.into_iter().map(GameResponse::from).collect()
}

/// GET /api/games
async fn list_games(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let games = GameService::new().list(db, user.id).await?;
    Ok(HttpResponse::Ok().json(to_responses(games)))
}

/// POST /api/games
async fn create_games(
    user: CurrentUser,
    body: ValidatedJson<Vec<CreateGameRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id;
    let batch: Vec<NewGame> = body.into_inner().into_iter().map(NewGame::from).collect();

    let created = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(GameService::new().create_many(txn, user_id, batch).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(to_responses(created)))
}

/// PUT /api/games
async fn update_games(
    user: CurrentUser,
    body: ValidatedJson<Vec<UpdateGameRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id;
    let batch: Vec<GameChanges> = body
        .into_inner()
        .into_iter()
        .map(GameChanges::from)
        .collect();

    let updated = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(GameService::new().update_many(txn, user_id, batch).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(to_responses(updated)))
}

/// DELETE /api/games?ids=<uuid>&ids=<uuid>
async fn delete_games(
    user: CurrentUser,
    ids: GameIds,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id;
    let ids = ids.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(GameService::new().delete_many(txn, user_id, &ids).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_games))
            .route(web::put().to(update_games))
            .route(web::delete().to(delete_games)),
    );
}
