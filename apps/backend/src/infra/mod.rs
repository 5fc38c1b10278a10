//! Infrastructure: database connection, DbErr translation and state assembly.

pub mod db;
pub mod db_errors;
pub mod state;
