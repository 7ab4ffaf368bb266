use std::sync::Arc;

use akira_anilist::AniListClient;
use akira_scraper::ScraperClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: akira_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// AniList metadata client.
    pub anilist: Arc<AniListClient>,
    /// Scraping webhook client; `None` when no webhook is configured.
    pub scraper: Option<Arc<ScraperClient>>,
}
