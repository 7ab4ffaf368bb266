//! Webhook response payloads and manga search results.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;
use crate::parse::RawEntry;

/// Image used when a search result has none.
pub const NO_IMAGE: &str = "https://via.placeholder.com/64x80?text=No+Image";

const GENRE_HINTS: [&str; 5] = ["Action", "Adventure", "Comedy", "Drama", "Fantasy"];

/// Body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WebhookPayload {
    Entries(Vec<RawEntry>),
    Html(String),
}

/// A manga found by the webhook's search mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Lower-cased title with every other character replaced by `_`.
    pub name: String,
    pub title: String,
    pub href: String,
    pub image: String,
    pub chapters: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genres: Vec<String>,
}

impl WebhookPayload {
    /// Decode a response body. `text/html` bodies are taken verbatim;
    /// anything else must be JSON (an entry list or an HTML string).
    pub fn decode(content_type: Option<&str>, body: String) -> Result<Self, ScraperError> {
        if content_type.is_some_and(|ct| ct.contains("text/html")) {
            return Ok(WebhookPayload::Html(body));
        }
        serde_json::from_str(&body).map_err(|e| ScraperError::Decode(e.to_string()))
    }

    /// The chapter entries, or a decode error for an HTML page.
    pub fn into_entries(self) -> Result<Vec<RawEntry>, ScraperError> {
        match self {
            WebhookPayload::Entries(entries) => Ok(entries),
            WebhookPayload::Html(_) => Err(ScraperError::Decode(
                "expected a chapter list, got an HTML page".into(),
            )),
        }
    }

    pub fn into_search_results(self) -> Vec<SearchResult> {
        match self {
            WebhookPayload::Html(html) => parse_search_page(&html),
            WebhookPayload::Entries(entries) => results_from_entries(&entries),
        }
    }
}

/// Slug used as a search result's `name`.
pub fn result_name(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// HTML search pages
// ---------------------------------------------------------------------------

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static CARD: LazyLock<Selector> = LazyLock::new(|| selector(".manga_search_item"));
static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("h3 a"));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static STRONG: LazyLock<Selector> = LazyLock::new(|| selector("strong"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));

/// Extract results from `.manga_search_item` cards. Cards without a
/// titled link are skipped.
pub fn parse_search_page(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    document.select(&CARD).filter_map(parse_card).collect()
}

fn parse_card(card: ElementRef<'_>) -> Option<SearchResult> {
    let link = card.select(&TITLE_LINK).next()?;
    let title = text_of(link);
    let href = link.value().attr("href")?.to_string();
    if title.is_empty() || href.is_empty() {
        return None;
    }

    let divs: Vec<String> = card.select(&DIV).map(text_of).collect();
    let innermost = |pred: &dyn Fn(&str) -> bool| {
        divs.iter()
            .filter(|t| pred(t))
            .min_by_key(|t| t.len())
            .cloned()
    };

    let chapters = innermost(&|t: &str| t.contains("Chapters Published")).unwrap_or_default();
    let status = if chapters.contains("Ongoing") {
        "Ongoing"
    } else {
        "Completed"
    };
    let genres = innermost(&|t: &str| GENRE_HINTS.iter().any(|g| t.contains(g)))
        .map(|text| {
            text.split(", ")
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let image = card
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or(NO_IMAGE)
        .to_string();

    Some(SearchResult {
        name: result_name(&title),
        kind: card.select(&STRONG).map(text_of).collect(),
        title,
        href,
        image,
        chapters,
        status: status.to_string(),
        genres,
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ---------------------------------------------------------------------------
// Entry lists
// ---------------------------------------------------------------------------

/// One result per distinct `ch`, imaged with its first page.
fn results_from_entries(entries: &[RawEntry]) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.ch.as_str()) {
            continue;
        }
        let image = serde_json::from_str::<Vec<String>>(&entry.page)
            .ok()
            .and_then(|pages| pages.into_iter().next())
            .unwrap_or_else(|| NO_IMAGE.to_string());

        results.push(SearchResult {
            name: result_name(&entry.ch),
            title: entry.ch.clone(),
            href: String::new(),
            image,
            chapters: String::new(),
            status: String::new(),
            kind: String::new(),
            genres: Vec::new(),
        });
    }
    results
}
