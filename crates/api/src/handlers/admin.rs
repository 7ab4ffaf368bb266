//! Admin handlers: AniList import and the scraping webhook.

use akira_anilist::client::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use akira_anilist::types::{AniListMedia, SearchPage};
use akira_anilist::{format_manga_for_app, FormattedManga};
use akira_core::chapter::duplicate_numbers;
use akira_core::error::CoreError;
use akira_core::manga::{api_manga_name, ScrapingProgress};
use akira_core::types::DbId;
use akira_db::models::chapter::NewChapter;
use akira_db::models::manga::{CreateManga, Manga, MangaWithChildren, UpdateManga};
use akira_db::repositories::MangaRepo;
use akira_scraper::{ConnectionReport, ScrapedChapter, ScraperClient, ScraperError, SearchResult};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::export::MangaExport;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{AniListSearchParams, ScraperSearchParams};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub anilist_id: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// Chapter titles (or `"Chapter N"`) to keep; empty keeps all.
    #[serde(default)]
    pub selected_chapters: Vec<String>,
}

// ---------------------------------------------------------------------------
// AniList
// ---------------------------------------------------------------------------

/// GET /api/admin/anilist/search?q=&page=&perPage=
pub async fn anilist_search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AniListSearchParams>,
) -> AppResult<Json<SearchPage>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("Search term is required".into()));
    }
    let page = state
        .anilist
        .search(
            term,
            params.page.unwrap_or(DEFAULT_PAGE),
            params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?;
    Ok(Json(page))
}

/// POST /api/admin/import
///
/// Fetches the AniList entry, maps it to site fields and stores it with
/// empty scraping progress.
pub async fn import(
    State(state): State<AppState>,
    AppJson(input): AppJson<ImportRequest>,
) -> AppResult<(StatusCode, Json<MangaWithChildren>)> {
    let media = state.anilist.get_by_id(input.anilist_id).await?;
    let formatted = format_manga_for_app(&media, Utc::now().date_naive());
    let manga = MangaRepo::create(&state.pool, &import_input(&media, formatted)).await?;

    tracing::info!(
        manga_id = manga.manga.id,
        anilist_id = media.id,
        title = %manga.manga.title,
        "Manga imported from AniList"
    );
    Ok((StatusCode::CREATED, Json(manga)))
}

/// Build the create DTO for an imported AniList entry.
pub fn import_input(media: &AniListMedia, formatted: FormattedManga) -> CreateManga {
    CreateManga {
        api_manga_name: Some(api_manga_name(&formatted.title)),
        title: formatted.title,
        author: Some(formatted.author),
        artist: Some(formatted.artist),
        status: Some(formatted.status),
        genres: Some(formatted.genres),
        synopsis: Some(formatted.synopsis),
        cover_image: Some(formatted.cover_image),
        banner_image: Some(formatted.banner_image),
        total_chapters: Some(formatted.total_chapters),
        total_views: Some(0),
        rating: Some(formatted.rating),
        last_updated: Some(formatted.last_updated),
        anilist_id: Some(media.id),
        scraping_progress: Some(ScrapingProgress::default()),
        chapters: Vec::new(),
        characters: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Scraping webhook
// ---------------------------------------------------------------------------

/// POST /api/admin/manga/{id}/test-connection
pub async fn test_connection(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ConnectionReport>> {
    let scraper = scraper(&state)?;
    let manga = manga_row(&state, id).await?;
    let report = scraper.test_connection(&manga.api_manga_name).await;
    tracing::info!(
        manga_id = id,
        success = report.success,
        cors_issue = report.cors_issue,
        chapters_found = report.chapters_found,
        "Scraper connection tested"
    );
    Ok(Json(report))
}

/// POST /api/admin/manga/{id}/scrape
///
/// Replaces the manga's chapters with the scraped set and records the
/// scraping progress.
pub async fn scrape(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ScrapeRequest>,
) -> AppResult<Json<MangaWithChildren>> {
    let scraper = scraper(&state)?;
    let manga = manga_row(&state, id).await?;

    let scraped = scraper
        .scrape_chapters(&manga.api_manga_name, &input.selected_chapters)
        .await?;

    let numbers: Vec<i32> = scraped.iter().map(|c| c.chapter_number).collect();
    let dups = duplicate_numbers(&numbers);
    if !dups.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Scraped chapters share chapter numbers: {dups:?}"
        ))));
    }

    let count = scraped.len();
    let update = UpdateManga {
        chapters: Some(scraped.into_iter().map(new_chapter).collect()),
        scraping_progress: Some(ScrapingProgress::completed(count, Utc::now())),
        ..Default::default()
    };
    let updated = MangaRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("manga {id} vanished during scrape")))?;

    tracing::info!(manga_id = id, chapters = count, "Chapters scraped");
    Ok(Json(updated))
}

/// GET /api/admin/scraper/search?name=
///
/// Webhook failures produce an empty list rather than an error.
pub async fn scraper_search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ScraperSearchParams>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let scraper = scraper(&state)?;
    let name = params.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Manga name is required".into()));
    }
    Ok(Json(scraper.search_manga(name).await))
}

/// GET /api/admin/manga/{id}/export
pub async fn export(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MangaExport>> {
    let manga = MangaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id,
        }))?;
    Ok(Json(MangaExport::from(&manga)))
}

// ---- helpers ----

fn scraper(state: &AppState) -> AppResult<&ScraperClient> {
    state
        .scraper
        .as_deref()
        .ok_or(AppError::Scraper(ScraperError::NotConfigured))
}

async fn manga_row(state: &AppState, id: DbId) -> AppResult<Manga> {
    MangaRepo::find_row(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id,
        }))
}

fn new_chapter(scraped: ScrapedChapter) -> NewChapter {
    NewChapter {
        title: scraped.title,
        chapter_number: scraped.chapter_number,
        release_date: None,
        pages: scraped.pages,
        views: None,
    }
}
