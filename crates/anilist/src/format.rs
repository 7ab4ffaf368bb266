//! Mapping from AniList media into the site's manga fields.

use std::sync::LazyLock;

use akira_core::manga::MangaStatus;
use akira_core::types::Date;
use regex::Regex;
use serde::Serialize;

use crate::types::{AniListMedia, StaffNode};

const UNKNOWN: &str = "Unknown";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Manga fields derived from an AniList entry, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedManga {
    pub title: String,
    pub author: String,
    pub artist: String,
    pub status: MangaStatus,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub cover_image: String,
    pub banner_image: String,
    pub total_chapters: i32,
    pub rating: f64,
    pub last_updated: Date,
}

/// Map an AniList entry to site fields. `today` becomes `last_updated`.
///
/// The author is the first staff member credited for "Story", the artist
/// the first credited for "Art" (falling back to the author).
pub fn format_manga_for_app(media: &AniListMedia, today: Date) -> FormattedManga {
    let staff: &[StaffNode] = media
        .staff
        .as_ref()
        .map(|s| s.nodes.as_slice())
        .unwrap_or_default();

    let author = credited(staff, "Story").unwrap_or_else(|| UNKNOWN.to_string());
    let artist = credited(staff, "Art").unwrap_or_else(|| author.clone());

    let title = media
        .title
        .english
        .clone()
        .or_else(|| media.title.romaji.clone())
        .unwrap_or_default();

    let cover_image = media
        .cover_image
        .as_ref()
        .and_then(|c| c.large.clone())
        .unwrap_or_default();
    let banner_image = media
        .banner_image
        .clone()
        .unwrap_or_else(|| cover_image.clone());

    FormattedManga {
        title,
        author,
        artist,
        status: media
            .status
            .as_deref()
            .map_or(MangaStatus::Ongoing, MangaStatus::from_anilist),
        genres: media.genres.clone(),
        synopsis: media.description.as_deref().map(strip_html).unwrap_or_default(),
        cover_image,
        banner_image,
        total_chapters: media.chapters.unwrap_or(0),
        rating: media.average_score.map_or(0.0, |s| f64::from(s) / 10.0),
        last_updated: today,
    }
}

/// Remove anything that looks like an HTML tag.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

fn credited(staff: &[StaffNode], role: &str) -> Option<String> {
    staff
        .iter()
        .find(|s| s.primary_occupations.iter().any(|o| o.contains(role)))
        .and_then(|s| s.name.full.clone())
}
