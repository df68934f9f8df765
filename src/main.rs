//! Repcount HTTP server
//!
//! Serves session control and frame ingestion for a single workout.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repcount::{config::Config, create_router, tracking::ProfileRegistry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging: JSON lines in production, human-readable otherwise
    let production = config.is_production();
    let default_filter = if production {
        "repcount=info,tower_http=info"
    } else {
        "repcount=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()))
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Repcount server starting ({})...", config.environment);

    // Exercise profiles are validated before anything is served
    let registry = ProfileRegistry::load(config.profiles_path.as_deref())
        .context("Failed to load exercise profiles")?;
    tracing::info!(
        "Loaded {} exercise profiles, default: {}",
        registry.len(),
        config.default_exercise
    );

    let state = AppState::new(config.clone(), registry);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
