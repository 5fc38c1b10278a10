//! Client for the Tankard games API.
//!
//! The front end keeps an editable list of [`Game`] rows, each tagged with
//! create / update / delete intent flags. [`GamesClient::submit`] turns that
//! list into at most three requests against `/api/games` and sends them
//! together.

pub mod client;
pub mod error;
pub mod game;
pub mod plan;

pub use client::{ClientConfig, GamesClient, SubmitReport, SubmittedRequest};
pub use error::ClientError;
pub use game::Game;
pub use plan::SubmitPlan;
pub use reqwest::{Method, StatusCode};
