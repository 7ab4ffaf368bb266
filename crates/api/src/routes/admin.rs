use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /anilist/search                 -> anilist_search
/// POST   /import                         -> import
/// POST   /manga/{id}/test-connection     -> test_connection
/// POST   /manga/{id}/scrape              -> scrape
/// GET    /manga/{id}/export              -> export
/// GET    /scraper/search                 -> scraper_search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/anilist/search", get(admin::anilist_search))
        .route("/import", post(admin::import))
        .route("/manga/{id}/test-connection", post(admin::test_connection))
        .route("/manga/{id}/scrape", post(admin::scrape))
        .route("/manga/{id}/export", get(admin::export))
        .route("/scraper/search", get(admin::scraper_search))
}
