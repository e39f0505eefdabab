//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::{
    config::{Settings, StorageBackend},
    database,
    repositories::{JokeRepository, JokeStore, MemoryStore, UserRepository, UserStore},
    session::SessionManager,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jokes: Arc<dyn JokeStore>,
    pub users: Arc<dyn UserStore>,
    pub sessions: SessionManager,
}

impl AppState {
    /// State backed by a single in-memory store
    pub fn in_memory(store: MemoryStore, sessions: SessionManager) -> Self {
        Self {
            jokes: Arc::new(store.clone()),
            users: Arc::new(store),
            sessions,
        }
    }

    /// Build the state described by `settings`, connecting to the database if needed
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let sessions = SessionManager::new(&settings.session)?;

        match settings.database.backend {
            StorageBackend::Postgres => {
                let pool = database::connect(&settings.database.config()?).await?;
                Ok(Self {
                    jokes: Arc::new(JokeRepository::new(pool.clone())),
                    users: Arc::new(UserRepository::new(pool)),
                    sessions,
                })
            }
            StorageBackend::Memory => {
                info!("Using the in-memory store; data is lost on restart");
                Ok(Self::in_memory(MemoryStore::new(), sessions))
            }
        }
    }
}
