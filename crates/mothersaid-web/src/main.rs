//! Mother's Aid portal server
//!
//! Run with: cargo run -p mothersaid-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use mothersaid_web::config::Config;
use mothersaid_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(api = %config.api_base_url, "Starting Mother's Aid portal server");

    let state = AppState::new(&config);
    let app = mothersaid_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
