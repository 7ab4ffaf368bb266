//! Chapter ordering rules for the chapter browser and the reader.
//!
//! Storage order is never trusted: "latest", previous/next and the `isNew`
//! flag are all derived from `chapter_number`.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::types::Date;

/// Number of highest-numbered chapters flagged as new.
pub const NEW_CHAPTER_WINDOW: usize = 3;

/// Default number of chapters returned by the "latest chapters" listing.
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// Read access to the chapter fields the ordering rules need.
pub trait ChapterView {
    fn chapter_number(&self) -> i32;
    fn title(&self) -> &str;
    fn release_date(&self) -> Date;
    fn views(&self) -> i64;
}

/// Sort key offered by the chapter browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterSort {
    #[default]
    Newest,
    Oldest,
    Views,
    Chapter,
}

/// Direction applied on top of a [`ChapterSort`].
///
/// `Desc` keeps the key's natural order (newest first, most viewed first,
/// lowest chapter number first); `Asc` reverses it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter chapters by a search term and sort them for the chapter browser.
///
/// A chapter matches when its title contains `search` (case-insensitive)
/// or the decimal form of its number contains it. An empty or missing term
/// matches everything. Ties keep chapter-number order.
pub fn filter_and_sort<C: ChapterView>(
    mut chapters: Vec<C>,
    search: Option<&str>,
    sort: ChapterSort,
    order: SortOrder,
) -> Vec<C> {
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        let needle = term.to_lowercase();
        chapters.retain(|c| {
            c.title().to_lowercase().contains(&needle)
                || c.chapter_number().to_string().contains(term)
        });
    }

    chapters.sort_by_key(|c| c.chapter_number());
    chapters.sort_by(|a, b| {
        let natural = natural_order(a, b, sort);
        match order {
            SortOrder::Desc => natural,
            SortOrder::Asc => natural.reverse(),
        }
    });
    chapters
}

fn natural_order<C: ChapterView>(a: &C, b: &C, sort: ChapterSort) -> Ordering {
    match sort {
        ChapterSort::Newest => b.release_date().cmp(&a.release_date()),
        ChapterSort::Oldest => a.release_date().cmp(&b.release_date()),
        ChapterSort::Views => b.views().cmp(&a.views()),
        ChapterSort::Chapter => a.chapter_number().cmp(&b.chapter_number()),
    }
}

/// The `limit` highest-numbered chapters, highest first.
pub fn latest<C: ChapterView>(mut chapters: Vec<C>, limit: usize) -> Vec<C> {
    chapters.sort_by_key(|c| std::cmp::Reverse(c.chapter_number()));
    chapters.truncate(limit);
    chapters
}

/// Previous and next chapter numbers around `current`.
///
/// `numbers` may be in any order. `current` does not need to be present:
/// the neighbours are the closest numbers below and above it.
pub fn neighbours(numbers: &[i32], current: i32) -> (Option<i32>, Option<i32>) {
    let previous = numbers.iter().copied().filter(|&n| n < current).max();
    let next = numbers.iter().copied().filter(|&n| n > current).min();
    (previous, next)
}

/// Whether chapter `number` falls in the [`NEW_CHAPTER_WINDOW`] highest
/// numbers of `numbers`.
pub fn is_new(numbers: &[i32], number: i32) -> bool {
    numbers.iter().filter(|&&n| n > number).count() < NEW_CHAPTER_WINDOW
        && numbers.contains(&number)
}

/// Chapter numbers that occur more than once, ascending.
pub fn duplicate_numbers(numbers: &[i32]) -> Vec<i32> {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    let mut dups: Vec<i32> = sorted
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect();
    dups.dedup();
    dups
}
