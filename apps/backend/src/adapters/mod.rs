//! Adapters for external dependencies.

pub mod games_sea;
pub mod users_sea;
