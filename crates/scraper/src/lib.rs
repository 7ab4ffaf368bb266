//! Client for the external chapter-scraping webhook.
//!
//! The webhook is POSTed a manga name and answers with either a flat list
//! of `{ch, page}` entries or an HTML search page. Requests go direct
//! first and fall back to a CORS proxy on network failure.

pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod search;
pub mod transport;

pub use client::{ConnectionReport, ScraperClient};
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use parse::{RawEntry, ScrapedChapter};
pub use search::{SearchResult, WebhookPayload};
pub use transport::Transport;
