//! Handlers for the `/manga` resource.
//!
//! Every response carries the manga's chapters and characters.

use akira_core::error::CoreError;
use akira_core::types::DbId;
use akira_db::models::manga::{CreateManga, MangaWithChildren, UpdateManga};
use akira_db::repositories::MangaRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/manga and GET /api/manga/all
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MangaWithChildren>>> {
    let manga = MangaRepo::list(&state.pool).await?;
    Ok(Json(manga))
}

/// POST /api/manga
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateManga>,
) -> AppResult<(StatusCode, Json<MangaWithChildren>)> {
    let manga = MangaRepo::create(&state.pool, &input).await?;
    tracing::info!(manga_id = manga.manga.id, title = %manga.manga.title, "Manga created");
    Ok((StatusCode::CREATED, Json(manga)))
}

/// GET /api/manga/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MangaWithChildren>> {
    let manga = MangaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id,
        }))?;
    Ok(Json(manga))
}

/// PUT /api/manga/{id}
///
/// A missing manga is a server error, matching the store's behaviour for
/// updates of absent rows.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateManga>,
) -> AppResult<Json<MangaWithChildren>> {
    let manga = MangaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("update of missing manga {id}")))?;
    Ok(Json(manga))
}

/// DELETE /api/manga/{id}
///
/// Chapters and characters go with it. A missing manga is a server error.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if MangaRepo::delete(&state.pool, id).await? {
        tracing::info!(manga_id = id, "Manga deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::InternalError(format!("delete of missing manga {id}")))
    }
}
