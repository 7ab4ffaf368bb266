//! Query parameter types for API handlers.

use akira_core::chapter::{ChapterSort, SortOrder};
use serde::Deserialize;

/// `?search=&sort=&order=` for the chapter browser.
#[derive(Debug, Default, Deserialize)]
pub struct ChapterListParams {
    pub search: Option<String>,
    #[serde(default)]
    pub sort: ChapterSort,
    #[serde(default)]
    pub order: SortOrder,
}

/// `?limit=` for the latest-chapters listing.
#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub limit: Option<usize>,
}

/// `?q=&page=&perPage=` for AniList search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListSearchParams {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// `?name=` for the scraping webhook search.
#[derive(Debug, Deserialize)]
pub struct ScraperSearchParams {
    #[serde(default)]
    pub name: String,
}
