//! Jokes service
//!
//! A server-rendered jokes site: a layout listing recent jokes, a random joke,
//! joke pages with owner-only deletion, a new-joke form and cookie sessions.
//! Routes render through per-route boundaries nested in the jokes layout, and
//! anything they decline reaches the document-level error pages.

pub mod auth;
pub mod boundary;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
pub mod views;

pub use state::AppState;
