//! Database connection and schema setup for the jokes service

use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::{DatabaseError, DatabaseResult},
};
use sqlx::PgPool;
use tracing::info;

/// Connect, check connectivity and apply pending migrations
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let pool = init_pool(config).await?;

    if !health_check(&pool).await? {
        return Err(DatabaseError::Configuration(
            "database did not answer the health check".to_string(),
        ));
    }
    info!("Database connection successful");

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    Ok(pool)
}
