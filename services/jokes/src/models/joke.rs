//! Joke model and ownership rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Joke entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Joke {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The `id`/`name` projection shown in the jokes list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct JokeListItem {
    pub id: Uuid,
    pub name: String,
}

impl From<&Joke> for JokeListItem {
    fn from(joke: &Joke) -> Self {
        Self {
            id: joke.id,
            name: joke.name.clone(),
        }
    }
}

/// New joke creation payload
#[derive(Debug, Clone)]
pub struct NewJoke {
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
}

/// Whether `user_id` owns `joke`. Anonymous visitors own nothing.
pub fn is_owner(joke: &Joke, user_id: Option<Uuid>) -> bool {
    user_id == Some(joke.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joke_owned_by(user_id: Uuid) -> Joke {
        Joke {
            id: Uuid::new_v4(),
            user_id,
            name: "Road worker".to_string(),
            content: "I never wanted to believe that my Dad was stealing from his job as a road worker. But when I got home, all the signs were there.".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_matches() {
        let owner = Uuid::new_v4();
        assert!(is_owner(&joke_owned_by(owner), Some(owner)));
    }

    #[test]
    fn test_other_user_is_not_owner() {
        let joke = joke_owned_by(Uuid::new_v4());
        assert!(!is_owner(&joke, Some(Uuid::new_v4())));
    }

    #[test]
    fn test_anonymous_is_not_owner() {
        let joke = joke_owned_by(Uuid::new_v4());
        assert!(!is_owner(&joke, None));
    }
}
