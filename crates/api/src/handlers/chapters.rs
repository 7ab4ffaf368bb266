//! Handlers for chapter browsing and the reader, nested under
//! `/manga/{id}/chapters`.

use akira_core::chapter::{self, DEFAULT_LATEST_LIMIT};
use akira_core::error::CoreError;
use akira_core::types::DbId;
use akira_db::models::chapter::Chapter;
use akira_db::repositories::{ChapterRepo, MangaRepo};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::{ChapterListParams, LatestParams};
use crate::state::AppState;

/// Reader payload: the chapter plus its neighbours' numbers.
#[derive(Debug, Serialize)]
pub struct ChapterWithNeighbours {
    pub chapter: Chapter,
    pub previous: Option<i32>,
    pub next: Option<i32>,
}

/// GET /api/manga/{id}/chapters?search=&sort=&order=
pub async fn list(
    State(state): State<AppState>,
    AppPath(manga_id): AppPath<DbId>,
    AppQuery(params): AppQuery<ChapterListParams>,
) -> AppResult<Json<Vec<Chapter>>> {
    let chapters = chapters_of(&state, manga_id).await?;
    Ok(Json(chapter::filter_and_sort(
        chapters,
        params.search.as_deref(),
        params.sort,
        params.order,
    )))
}

/// GET /api/manga/{id}/chapters/latest?limit=
pub async fn latest(
    State(state): State<AppState>,
    AppPath(manga_id): AppPath<DbId>,
    AppQuery(params): AppQuery<LatestParams>,
) -> AppResult<Json<Vec<Chapter>>> {
    let chapters = chapters_of(&state, manga_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    Ok(Json(chapter::latest(chapters, limit)))
}

/// GET /api/manga/{id}/chapters/{number}
pub async fn get_by_number(
    State(state): State<AppState>,
    AppPath((manga_id, number)): AppPath<(DbId, i32)>,
) -> AppResult<Json<ChapterWithNeighbours>> {
    let found = ChapterRepo::find_by_number(&state.pool, manga_id, number)
        .await?
        .ok_or_else(|| chapter_not_found(number))?;

    let numbers: Vec<i32> = ChapterRepo::list_by_manga(&state.pool, manga_id)
        .await?
        .iter()
        .map(|c| c.chapter_number)
        .collect();
    let (previous, next) = chapter::neighbours(&numbers, number);

    Ok(Json(ChapterWithNeighbours {
        chapter: found,
        previous,
        next,
    }))
}

/// POST /api/manga/{id}/chapters/{number}/view
pub async fn record_view(
    State(state): State<AppState>,
    AppPath((manga_id, number)): AppPath<(DbId, i32)>,
) -> AppResult<Json<Chapter>> {
    let updated = ChapterRepo::record_view(&state.pool, manga_id, number)
        .await?
        .ok_or_else(|| chapter_not_found(number))?;
    Ok(Json(updated))
}

/// All chapters of a manga, or 404 when the manga does not exist.
async fn chapters_of(state: &AppState, manga_id: DbId) -> AppResult<Vec<Chapter>> {
    if MangaRepo::find_row(&state.pool, manga_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: manga_id,
        }));
    }
    Ok(ChapterRepo::list_by_manga(&state.pool, manga_id).await?)
}

fn chapter_not_found(number: i32) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Chapter",
        id: DbId::from(number),
    })
}
