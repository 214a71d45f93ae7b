mod config;
mod db;
mod errors;
mod models;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::resume::KeywordSet;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerSync API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Load the role keyword table once; it is read-only from here on
    let keywords = match &config.job_keywords_path {
        Some(path) => {
            info!("Loading keyword table from {}", path.display());
            KeywordSet::from_path(path)?
        }
        None => KeywordSet::builtin().clone(),
    };
    if !keywords.has_role(&config.default_job_role) {
        warn!(
            "DEFAULT_JOB_ROLE '{}' has no keyword list; the 'default' list will be used",
            config.default_job_role
        );
    }
    info!(
        "Keyword table ready ({} roles, default role for requests: {})",
        keywords.role_count(),
        config.default_job_role
    );

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        keywords: Arc::new(keywords),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
