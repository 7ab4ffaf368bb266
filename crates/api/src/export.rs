//! Standalone app-data export of a manga and its chapters.
//!
//! The export renumbers chapter ids `1..=n` in chapter-number order and
//! flags the last [`NEW_CHAPTER_WINDOW`] chapters as new.

use akira_core::chapter::NEW_CHAPTER_WINDOW;
use akira_core::types::Date;
use akira_db::models::manga::MangaWithChildren;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaExport {
    pub manga_info: ExportMangaInfo,
    pub chapters: Vec<ExportChapter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMangaInfo {
    pub title: String,
    pub author: String,
    pub artist: String,
    pub status: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub cover_image: String,
    pub banner_image: String,
    pub total_chapters: usize,
    pub total_views: i64,
    pub rating: f64,
    pub last_updated: Date,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportChapter {
    pub id: usize,
    pub title: String,
    pub chapter_number: i32,
    pub release_date: Date,
    pub pages: Vec<String>,
    pub views: i64,
    pub is_new: bool,
}

impl From<&MangaWithChildren> for MangaExport {
    fn from(full: &MangaWithChildren) -> Self {
        let manga = &full.manga;

        let mut chapters: Vec<_> = full.chapters.iter().collect();
        chapters.sort_by_key(|c| c.chapter_number);
        let count = chapters.len();

        MangaExport {
            manga_info: ExportMangaInfo {
                title: manga.title.clone(),
                author: manga.author.clone(),
                artist: manga.artist.clone(),
                status: manga.status.clone(),
                genres: manga.genres.clone(),
                synopsis: manga.synopsis.clone(),
                cover_image: manga.cover_image.clone(),
                banner_image: manga.banner_image.clone(),
                total_chapters: count,
                total_views: manga.total_views,
                rating: manga.rating,
                last_updated: manga.updated_at.date_naive(),
            },
            chapters: chapters
                .into_iter()
                .enumerate()
                .map(|(idx, c)| ExportChapter {
                    id: idx + 1,
                    title: c.title.clone(),
                    chapter_number: c.chapter_number,
                    release_date: c.release_date,
                    pages: c.pages.clone(),
                    views: c.views,
                    is_new: idx + NEW_CHAPTER_WINDOW >= count,
                })
                .collect(),
        }
    }
}
