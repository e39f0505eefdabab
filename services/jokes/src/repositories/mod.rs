//! Repositories for database operations
//!
//! Handlers talk to storage through the [`JokeStore`] and [`UserStore`]
//! traits so the same routes run against PostgreSQL or the in-memory store.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Joke, JokeListItem, NewJoke, NewUser, User};

pub mod joke;
pub mod memory;
pub mod user;

pub use joke::JokeRepository;
pub use memory::MemoryStore;
pub use user::UserRepository;

/// Storage operations over jokes
#[async_trait]
pub trait JokeStore: Send + Sync {
    /// The `take` most recently created jokes, newest first
    async fn recent(&self, take: i64) -> DatabaseResult<Vec<JokeListItem>>;

    /// Find a joke by ID
    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Joke>>;

    /// Total number of jokes
    async fn count(&self) -> DatabaseResult<i64>;

    /// The joke at position `skip` in creation order
    async fn nth(&self, skip: i64) -> DatabaseResult<Option<Joke>>;

    /// Create a new joke
    async fn create(&self, new_joke: &NewJoke) -> DatabaseResult<Joke>;

    /// Delete a joke by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;
}

/// Storage operations over users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Create a new user
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;
}
