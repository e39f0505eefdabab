//! Jokes service models

pub mod joke;
pub mod user;

// Re-export for convenience
pub use joke::{Joke, JokeListItem, NewJoke, is_owner};
pub use user::{LoginCredentials, NewUser, User};
