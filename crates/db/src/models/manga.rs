//! Manga entity model and DTOs.

use akira_core::manga::{MangaStatus, ScrapingProgress};
use akira_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::chapter::{Chapter, NewChapter};
use crate::models::character::{Character, NewCharacter};

/// A manga row from the `manga` table.
///
/// `status` is constrained by the database to the [`MangaStatus`] values.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub artist: String,
    pub status: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub cover_image: String,
    pub banner_image: String,
    pub total_chapters: i32,
    pub total_views: i64,
    pub rating: f64,
    pub last_updated: Date,
    pub anilist_id: Option<i32>,
    /// Name sent to the scraping webhook for this manga.
    pub api_manga_name: String,
    pub scraping_progress: Json<ScrapingProgress>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A manga together with its chapters (ordered by chapter number) and
/// characters. This is the shape every manga endpoint returns.
#[derive(Debug, Clone, Serialize)]
pub struct MangaWithChildren {
    #[serde(flatten)]
    pub manga: Manga,
    pub chapters: Vec<Chapter>,
    pub characters: Vec<Character>,
}

/// DTO for creating a new manga.
///
/// Only `title` is required; everything else falls back to the column
/// defaults. `description` is accepted as an alias of `synopsis` because
/// the import flow uses that name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManga {
    pub title: String,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub status: Option<MangaStatus>,
    pub genres: Option<Vec<String>>,
    #[serde(alias = "description")]
    pub synopsis: Option<String>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub total_chapters: Option<i32>,
    pub total_views: Option<i64>,
    pub rating: Option<f64>,
    pub last_updated: Option<Date>,
    pub anilist_id: Option<i32>,
    pub api_manga_name: Option<String>,
    pub scraping_progress: Option<ScrapingProgress>,
    #[serde(default)]
    pub chapters: Vec<NewChapter>,
    #[serde(default)]
    pub characters: Vec<NewCharacter>,
}

/// DTO for updating an existing manga. All fields are optional.
///
/// A present `chapters` (or `characters`) list replaces the stored set
/// entirely; an absent one leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManga {
    pub title: Option<String>,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub status: Option<MangaStatus>,
    pub genres: Option<Vec<String>>,
    #[serde(alias = "description")]
    pub synopsis: Option<String>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    /// Ignored when `chapters` is present: the count is recomputed.
    pub total_chapters: Option<i32>,
    pub total_views: Option<i64>,
    pub rating: Option<f64>,
    pub last_updated: Option<Date>,
    pub anilist_id: Option<i32>,
    pub api_manga_name: Option<String>,
    pub scraping_progress: Option<ScrapingProgress>,
    pub chapters: Option<Vec<NewChapter>>,
    pub characters: Option<Vec<NewCharacter>>,
}
