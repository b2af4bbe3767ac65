//! Keyword matching against normalized document text.
//!
//! Counts non-overlapping literal occurrences of each taxonomy variant.
//! Word-boundary categories require the adjacent characters to be
//! non-alphanumeric, so `java` never counts inside `javascript` while
//! punctuated variants like `c++` or `vue.js` still match literally.

mod types;

pub use types::MatchResult;

use crate::normalize::normalize;
use crate::taxonomy::{MatchPolicy, Taxonomy};
use std::collections::BTreeSet;

/// Scan raw document text against the taxonomy. Pure: same text and
/// taxonomy always produce the same result.
pub fn scan_text(text: &str, taxonomy: &Taxonomy) -> MatchResult {
    let normalized = normalize(text);
    let mut result = MatchResult::default();

    for category in taxonomy.categories() {
        let mut count = 0;
        let mut hits: BTreeSet<String> = BTreeSet::new();

        for variant in &category.variants {
            let occurrences = match category.policy {
                MatchPolicy::WordBoundary => count_word_occurrences(&normalized, variant),
                MatchPolicy::Substring => count_occurrences(&normalized, variant),
            };
            if occurrences > 0 {
                count += occurrences;
                hits.insert(variant.clone());
            }
        }

        result.counts.insert(category.name.clone(), count);
        if !hits.is_empty() {
            result.matched_variants.insert(category.name.clone(), hits);
        }
    }

    result
}

/// Non-overlapping occurrences of `needle` delimited by non-alphanumeric
/// characters (or the ends of the text).
fn count_word_occurrences(haystack: &str, needle: &str) -> usize {
    debug_assert!(!needle.is_empty());

    let mut count = 0;
    let mut start = 0;

    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        let end = begin + needle.len();

        let left_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if left_ok && right_ok {
            count += 1;
            start = end;
        } else {
            // embedded in a larger token: resume one character further on
            let step = haystack[begin..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
            start = begin + step;
        }
    }

    count
}

/// Non-overlapping occurrences with no boundary requirement.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    debug_assert!(!needle.is_empty());

    let mut count = 0;
    let mut start = 0;

    while let Some(offset) = haystack[start..].find(needle) {
        count += 1;
        start += offset + needle.len();
    }

    count
}
