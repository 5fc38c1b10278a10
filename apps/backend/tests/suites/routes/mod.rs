mod accounts;
mod auth;
mod games_errors;
mod health;
