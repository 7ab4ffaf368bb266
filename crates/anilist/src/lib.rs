//! Read-only client for the AniList GraphQL API.
//!
//! [`AniListClient`] searches and fetches manga metadata;
//! [`format_manga_for_app`] maps a result into the site's manga shape.

pub mod client;
pub mod error;
pub mod format;
pub mod types;

pub use client::AniListClient;
pub use error::AniListError;
pub use format::{format_manga_for_app, FormattedManga};
