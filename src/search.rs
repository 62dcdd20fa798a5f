//! Fuzzy matching behind the category search bar.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Case-insensitive fuzzy matcher.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    /// Create a new matcher instance.
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default(),
        }
    }

    /// Get the match score for ranking results.
    ///
    /// Returns `Some(score)` if the pattern matches, where higher scores
    /// indicate better matches. Matching is case-insensitive and allows
    /// gaps, so `"hcl"` matches `"House cleaning"`.
    pub fn score(&self, text: &str, pattern: &str) -> Option<i64> {
        // Convert pattern to lowercase for case-insensitive matching
        let pattern_lower = pattern.to_lowercase();
        self.inner.fuzzy_match(text, &pattern_lower)
    }

    /// Best score among several fields of one item.
    pub fn best_score<'a>(
        &self,
        texts: impl IntoIterator<Item = &'a str>,
        pattern: &str,
    ) -> Option<i64> {
        texts
            .into_iter()
            .filter_map(|text| self.score(text, pattern))
            .max()
    }
}
