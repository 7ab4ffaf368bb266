//! Turning raw webhook entries into chapters.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

/// One row of a webhook chapter list. `page` is a JSON-encoded array of
/// image URLs; a chapter may span several rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub ch: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedChapter {
    pub title: String,
    /// Always empty for webhook results.
    pub url: String,
    pub chapter_number: i32,
    pub pages: Vec<String>,
}

static NUMBER_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [r"(?i)chapter\s*(\d+)", r"(?i)ch\s*(\d+)", r"(\d+)"]
        .map(|p| Regex::new(p).expect("valid regex"))
});

/// Parse a chapter number out of a title: "chapter N", then "ch N", then
/// the first number anywhere.
pub fn extract_chapter_number(title: &str) -> Option<i32> {
    NUMBER_PATTERNS.iter().find_map(|re| {
        re.captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Group entries by `ch` in first-seen order, merge and sort their pages,
/// and number each chapter. Titles without a number get their 1-based
/// group position. The result is ordered by chapter number.
pub fn parse_entries(entries: &[RawEntry]) -> Result<Vec<ScrapedChapter>, ScraperError> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let pages: Vec<String> = serde_json::from_str(&entry.page).map_err(|e| {
            ScraperError::Decode(format!("pages of '{}' are not a JSON array: {e}", entry.ch))
        })?;

        match index.get(entry.ch.as_str()) {
            Some(&slot) => groups[slot].1.extend(pages),
            None => {
                index.insert(&entry.ch, groups.len());
                groups.push((entry.ch.clone(), pages));
            }
        }
    }

    let mut chapters: Vec<ScrapedChapter> = groups
        .into_iter()
        .enumerate()
        .map(|(idx, (title, mut pages))| {
            pages.sort();
            let position = i32::try_from(idx + 1).unwrap_or(i32::MAX);
            ScrapedChapter {
                chapter_number: extract_chapter_number(&title).unwrap_or(position),
                title,
                url: String::new(),
                pages,
            }
        })
        .collect();

    chapters.sort_by_key(|c| c.chapter_number);
    Ok(chapters)
}

/// Keep the chapters named in `selected`, by exact title or as
/// `"Chapter N"`. An empty selection keeps everything.
pub fn filter_selected(chapters: Vec<ScrapedChapter>, selected: &[String]) -> Vec<ScrapedChapter> {
    if selected.is_empty() {
        return chapters;
    }
    chapters
        .into_iter()
        .filter(|c| {
            let numbered = format!("Chapter {}", c.chapter_number);
            selected.iter().any(|s| *s == c.title || *s == numbered)
        })
        .collect()
}
