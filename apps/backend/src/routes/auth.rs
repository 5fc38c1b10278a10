//! Accounts: `POST /api/signup` and `POST /api/signin` hand out access tokens;
//! `GET /api/profile` is mounted behind `JwtExtract`.
//!
//! Tokens are stateless, so signing out is the client dropping its token.

use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::mint_access_token;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::logging::security;
use crate::repos::users::User;
use crate::services::users::UserService;
use crate::state::app_state::AppState;

/// Body of both sign-up and sign-in. Missing fields fail validation the same
/// way blank ones do.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: ProfileResponse,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

fn auth_response(user: User, app_state: &AppState) -> Result<AuthResponse, AppError> {
    let token = mint_access_token(user.id, SystemTime::now(), &app_state.security)?;
    Ok(AuthResponse {
        token,
        user: ProfileResponse::from(user),
    })
}

/// POST /api/signup
async fn signup(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CredentialsRequest { username, password } = body.into_inner();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(UserService::new().signup(txn, &username, password).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(auth_response(user, &app_state)?))
}

/// POST /api/signin
async fn signin(
    req: HttpRequest,
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CredentialsRequest { username, password } = body.into_inner();
    let db = require_db(&app_state)?;

    match UserService::new().signin(db, &username, password).await? {
        Some(user) => Ok(HttpResponse::Ok().json(auth_response(user, &app_state)?)),
        None => {
            security::signin_failed(req.path());
            Err(AppError::invalid_credentials())
        }
    }
}

/// GET /api/profile
async fn profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = UserService::new().profile(db, user.id).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

/// The open account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/signup").route(web::post().to(signup)))
        .service(web::resource("/api/signin").route(web::post().to(signin)));
}

/// Routes for the `/api/profile` scope.
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(profile)));
}
