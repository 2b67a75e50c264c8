use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use htb_badge::config::Config;
use htb_badge::handlers::{self, AppState};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration from the environment, builds the
/// HTB client and router, then serves until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "htb_badge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let state = AppState::new(config.clone())?;
    tracing::info!(
        "✓ HTB client initialized: {} (timeout {:?})",
        config.provider_base_url,
        config.upstream_timeout
    );

    let app = handlers::router(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
