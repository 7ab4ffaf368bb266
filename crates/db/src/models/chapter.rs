//! Chapter entity model and DTOs.

use akira_core::chapter::ChapterView;
use akira_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chapter row from the `chapters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: DbId,
    pub manga_id: DbId,
    pub title: String,
    pub chapter_number: i32,
    pub release_date: Date,
    /// Page image URLs in reading order.
    pub pages: Vec<String>,
    pub views: i64,
    pub is_new: bool,
}

impl ChapterView for Chapter {
    fn chapter_number(&self) -> i32 {
        self.chapter_number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn release_date(&self) -> Date {
        self.release_date
    }

    fn views(&self) -> i64 {
        self.views
    }
}

/// DTO for a chapter written as part of a manga create/update or a scrape.
///
/// `isNew` is not accepted: it is derived from chapter numbers on write.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChapter {
    pub title: String,
    pub chapter_number: i32,
    /// Defaults to the current date.
    pub release_date: Option<Date>,
    #[serde(default)]
    pub pages: Vec<String>,
    /// Defaults to 0.
    pub views: Option<i64>,
}
