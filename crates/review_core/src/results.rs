use review_logging::review_debug;

use crate::filter::{Filters, SearchFilter};
use crate::tree::{build_tree, ViewTree};
use crate::{CategoryTag, ResultNode, ReviewError};

/// The validation result as shown to the user: the display tree together
/// with the filters currently applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub(crate) tree: ViewTree,
    pub(crate) filters: Filters,
}

impl ResultsView {
    pub fn build(nodes: &[ResultNode]) -> Self {
        Self {
            tree: build_tree(nodes),
            filters: Filters::default(),
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Recompiles the search filter and refreshes every leaf. An invalid
    /// pattern leaves both the filter and the tree untouched.
    pub fn set_search_pattern(&mut self, pattern: &str) -> Result<(), ReviewError> {
        let search = SearchFilter::compile(pattern)?;
        self.tree.for_each_leaf_mut(|title, leaf| {
            leaf.search_match = search.matches(title, &leaf.url);
        });
        self.filters.search = search;
        self.tree.propagate_visibility();
        review_debug!("Search pattern set to {:?}", pattern);
        Ok(())
    }

    pub fn set_category_enabled(&mut self, tag: CategoryTag, enabled: bool) {
        self.filters.categories.set(tag, enabled);
        let categories = self.filters.categories;
        self.tree.for_each_leaf_mut(|_, leaf| {
            if leaf.tags.contains(tag) {
                leaf.category_match = categories.matches(leaf.tags);
            }
        });
        self.tree.propagate_visibility();
        review_debug!("Category {} enabled={}", tag, enabled);
    }
}
