//! Joke repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::JokeStore;
use crate::models::{Joke, JokeListItem, NewJoke};

/// Joke repository
#[derive(Clone)]
pub struct JokeRepository {
    pool: PgPool,
}

impl JokeRepository {
    /// Create a new joke repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JokeStore for JokeRepository {
    async fn recent(&self, take: i64) -> DatabaseResult<Vec<JokeListItem>> {
        let jokes = sqlx::query_as::<_, JokeListItem>(
            r#"
            SELECT id, name
            FROM jokes
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(take)
        .fetch_all(&self.pool)
        .await?;

        Ok(jokes)
    }

    async fn find(&self, id: Uuid) -> DatabaseResult<Option<Joke>> {
        let joke = sqlx::query_as::<_, Joke>(
            r#"
            SELECT id, user_id, name, content, created_at, updated_at
            FROM jokes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(joke)
    }

    async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jokes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn nth(&self, skip: i64) -> DatabaseResult<Option<Joke>> {
        let joke = sqlx::query_as::<_, Joke>(
            r#"
            SELECT id, user_id, name, content, created_at, updated_at
            FROM jokes
            ORDER BY created_at, id
            LIMIT 1 OFFSET $1
            "#,
        )
        .bind(skip)
        .fetch_optional(&self.pool)
        .await?;

        Ok(joke)
    }

    async fn create(&self, new_joke: &NewJoke) -> DatabaseResult<Joke> {
        info!("Creating joke {:?} for user {}", new_joke.name, new_joke.user_id);

        let joke = sqlx::query_as::<_, Joke>(
            r#"
            INSERT INTO jokes (user_id, name, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, content, created_at, updated_at
            "#,
        )
        .bind(new_joke.user_id)
        .bind(&new_joke.name)
        .bind(&new_joke.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(joke)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting joke {}", id);

        let result = sqlx::query("DELETE FROM jokes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
