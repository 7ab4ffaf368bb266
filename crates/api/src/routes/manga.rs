use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{chapters, manga};
use crate::state::AppState;

/// Routes mounted at `/manga`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /all                             -> list
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// DELETE /{id}                            -> delete
///
/// GET    /{id}/chapters                   -> chapters::list
/// GET    /{id}/chapters/latest            -> chapters::latest
/// GET    /{id}/chapters/{number}          -> chapters::get_by_number
/// POST   /{id}/chapters/{number}/view     -> chapters::record_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manga::list).post(manga::create))
        .route("/all", get(manga::list))
        .route(
            "/{id}",
            get(manga::get_by_id).put(manga::update).delete(manga::delete),
        )
        .route("/{id}/chapters", get(chapters::list))
        .route("/{id}/chapters/latest", get(chapters::latest))
        .route("/{id}/chapters/{number}", get(chapters::get_by_number))
        .route("/{id}/chapters/{number}/view", post(chapters::record_view))
}
