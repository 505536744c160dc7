//! Keyword projection over the accumulated list.

use taipei_core::Attraction;

/// Attractions whose name or introduction contains `keyword`, ignoring
/// case, in their original order. A blank keyword returns everything.
///
/// Pure: recomputed on every read, never stored.
#[must_use]
pub fn visible<'a>(attractions: &'a [Attraction], keyword: &str) -> Vec<&'a Attraction> {
    attractions
        .iter()
        .filter(|a| a.matches_keyword(keyword))
        .collect()
}
