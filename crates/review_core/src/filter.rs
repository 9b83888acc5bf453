use regex::{Regex, RegexBuilder};

use crate::tree::LeafEntry;
use crate::{CategorySet, CategoryTag, ReviewError};

/// Case-insensitive pattern tested against a leaf's title and URL.
/// The empty pattern matches everything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pattern: String,
    matcher: Option<Regex>,
}

impl SearchFilter {
    pub fn compile(pattern: &str) -> Result<Self, ReviewError> {
        if pattern.is_empty() {
            return Ok(Self::default());
        }
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| ReviewError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: Some(matcher),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_identity(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn matches(&self, title: &str, url: &str) -> bool {
        match &self.matcher {
            None => true,
            Some(matcher) => matcher.is_match(title) || matcher.is_match(url),
        }
    }
}

impl PartialEq for SearchFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for SearchFilter {}

/// Checkbox state, one toggle per category tag.
///
/// A leaf passes when every tag it carries is enabled, so a redirect
/// (tagged warning and redirect) is hidden by either checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    enabled: CategorySet,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            enabled: CategorySet::all(),
        }
    }
}

impl CategoryFilter {
    pub fn set(&mut self, tag: CategoryTag, enabled: bool) {
        if enabled {
            self.enabled.insert(tag);
        } else {
            self.enabled.remove(tag);
        }
    }

    pub fn is_enabled(&self, tag: CategoryTag) -> bool {
        self.enabled.contains(tag)
    }

    pub fn matches(&self, tags: CategorySet) -> bool {
        tags.is_subset_of(self.enabled)
    }

    pub fn toggles(&self) -> Vec<(CategoryTag, bool)> {
        CategoryTag::ALL
            .into_iter()
            .map(|tag| (tag, self.is_enabled(tag)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub search: SearchFilter,
    pub categories: CategoryFilter,
}

impl Filters {
    /// Sets both per-leaf predicates from the active filters.
    pub fn evaluate(&self, title: &str, leaf: &mut LeafEntry) {
        leaf.search_match = self.search.matches(title, &leaf.url);
        leaf.category_match = self.categories.matches(leaf.tags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookmarkStatus;

    #[test]
    fn empty_pattern_is_identity() {
        let filter = SearchFilter::compile("").unwrap();
        assert!(filter.is_identity());
        assert!(filter.matches("", ""));
    }

    #[test]
    fn pattern_is_case_insensitive_on_title_or_url() {
        let filter = SearchFilter::compile("rust").unwrap();
        assert!(filter.matches("The RUST book", "https://doc.example"));
        assert!(filter.matches("Docs", "https://Rust-lang.org"));
        assert!(!filter.matches("Docs", "https://python.org"));
    }

    #[test]
    fn pattern_supports_regex_syntax() {
        let filter = SearchFilter::compile(r"^https://(a|b)\.example").unwrap();
        assert!(filter.matches("x", "https://b.example/path"));
        assert!(!filter.matches("x", "https://c.example/path"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = SearchFilter::compile("(unclosed").unwrap_err();
        assert!(matches!(err, ReviewError::InvalidPattern { pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn category_filter_requires_every_tag_enabled() {
        let mut filter = CategoryFilter::default();
        let redirect = BookmarkStatus::Redirect.tags();
        assert!(filter.matches(redirect));

        filter.set(CategoryTag::Warning, false);
        assert!(!filter.matches(redirect));

        filter.set(CategoryTag::Warning, true);
        filter.set(CategoryTag::Redirect, false);
        assert!(!filter.matches(redirect));
        assert!(filter.matches(BookmarkStatus::NotFound.tags()));
        assert!(filter.matches(CategorySet::EMPTY));
    }
}
