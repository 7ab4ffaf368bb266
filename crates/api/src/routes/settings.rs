use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /    -> get
/// POST   /    -> upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(settings::get).post(settings::upsert))
}
