pub mod admin;
pub mod health;
pub mod manga;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /manga                                        list, create
/// /manga/all                                    list
/// /manga/{id}                                   get, update, delete
/// /manga/{id}/chapters                          filtered, sorted chapter list
/// /manga/{id}/chapters/latest                   highest-numbered chapters
/// /manga/{id}/chapters/{number}                 chapter with previous/next
/// /manga/{id}/chapters/{number}/view            count a read (POST)
///
/// /settings                                     get, upsert
///
/// /admin/anilist/search                         AniList search
/// /admin/import                                 import from AniList (POST)
/// /admin/manga/{id}/test-connection             check scraping webhook (POST)
/// /admin/manga/{id}/scrape                      scrape chapters (POST)
/// /admin/manga/{id}/export                      app-data export
/// /admin/scraper/search                         webhook search
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/manga", manga::router())
        .nest("/settings", settings::router())
        .nest("/admin", admin::router())
}
