//! In-memory store used for local development and tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JokeStore, UserStore};
use crate::models::{Joke, JokeListItem, NewJoke, NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    /// Kept in creation order.
    jokes: Vec<Joke>,
}

/// Process-local store implementing both [`JokeStore`] and [`UserStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JokeStore for MemoryStore {
    async fn recent(&self, take: i64) -> DatabaseResult<Vec<JokeListItem>> {
        let take = usize::try_from(take).unwrap_or(0);
        let tables = self.tables.read().await;
        Ok(tables
            .jokes
            .iter()
            .rev()
            .take(take)
            .map(JokeListItem::from)
            .collect())
    }

    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Joke>> {
        let tables = self.tables.read().await;
        Ok(tables.jokes.iter().find(|joke| joke.id == id).cloned())
    }

    async fn count(&self) -> DatabaseResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.jokes.len() as i64)
    }

    async fn nth(&self, skip: i64) -> DatabaseResult<Option<Joke>> {
        let Ok(skip) = usize::try_from(skip) else {
            return Ok(None);
        };
        let tables = self.tables.read().await;
        Ok(tables.jokes.get(skip).cloned())
    }

    async fn create(&self, new_joke: &NewJoke) -> DatabaseResult<Joke> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|user| user.id == new_joke.user_id) {
            return Err(DatabaseError::Constraint(format!(
                "joke owner {} does not exist",
                new_joke.user_id
            )));
        }

        let now = Utc::now();
        let joke = Joke {
            id: Uuid::new_v4(),
            user_id: new_joke.user_id,
            name: new_joke.name.clone(),
            content: new_joke.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.jokes.push(joke.clone());
        Ok(joke)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.jokes.len();
        tables.jokes.retain(|joke| joke.id != id);
        Ok(tables.jokes.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|user| user.username == new_user.username)
        {
            return Err(DatabaseError::Constraint(format!(
                "username {} is taken",
                new_user.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}
