//! Site-wide settings: known keys and their built-in defaults.
//!
//! Settings are a flat key → string map. Stored values always win over
//! the defaults; unknown keys are kept as-is.

use std::collections::BTreeMap;

pub const SITE_TITLE: &str = "siteTitle";
pub const SITE_DESCRIPTION: &str = "siteDescription";
pub const SITE_LOGO: &str = "siteLogo";
pub const DEFAULT_COVER_IMAGE: &str = "defaultCoverImage";
pub const DEFAULT_BANNER_IMAGE: &str = "defaultBannerImage";
pub const DEFAULT_CHAPTER_IMAGE: &str = "defaultChapterImage";

const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/6208086/pexels-photo-6208086.jpeg?auto=compress&cs=tinysrgb&w=1200";

/// Built-in values served for keys that were never stored.
pub const DEFAULTS: &[(&str, &str)] = &[
    (SITE_TITLE, "Akira Chronicles"),
    (
        SITE_DESCRIPTION,
        "Read Akira Chronicles manga online with the best reading experience.",
    ),
    (SITE_LOGO, ""),
    (DEFAULT_COVER_IMAGE, PLACEHOLDER_IMAGE),
    (DEFAULT_BANNER_IMAGE, PLACEHOLDER_IMAGE),
    (DEFAULT_CHAPTER_IMAGE, PLACEHOLDER_IMAGE),
];

/// Overlay stored settings on top of [`DEFAULTS`].
pub fn merge_with_defaults<I>(stored: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut merged: BTreeMap<String, String> = DEFAULTS
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    merged.extend(stored);
    merged
}
