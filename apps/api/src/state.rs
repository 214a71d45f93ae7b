use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::resume::KeywordSet;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Role keyword table, read-only after startup.
    pub keywords: Arc<KeywordSet>,
}
