use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod games;
pub mod health;

/// Mount every route: `/health`, `/api/signup` and `/api/signin` open;
/// `/api/profile` and `/api/games` behind `JwtExtract`.
/// Shared by `main.rs` and the integration tests so both see the same app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.configure(auth::configure_routes);
    cfg.service(
        web::scope("/api/profile")
            .wrap(JwtExtract)
            .configure(auth::configure_profile_routes),
    );
    cfg.service(
        web::scope("/api/games")
            .wrap(JwtExtract)
            .configure(games::configure_routes),
    );
}
