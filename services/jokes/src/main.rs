use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jokes::{config::Settings, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.level))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting jokes service");

    let state = AppState::from_settings(&settings).await?;
    let app = routes::create_router(state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Jokes service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
