use std::collections::{BTreeMap, BTreeSet};

/// Keyword hits for one document: per-category occurrence counts plus the
/// variants that produced them. Built once per document, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Every taxonomy category has an entry, zero or not.
    pub counts: BTreeMap<String, usize>,
    /// Only categories with at least one hit appear here.
    pub matched_variants: BTreeMap<String, BTreeSet<String>>,
}

impl MatchResult {
    pub fn total_hits(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }
}
