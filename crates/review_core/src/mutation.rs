//! In-place edits of the result tree.
//!
//! Removals are optimistic: the node leaves the tree before the host store
//! has confirmed anything, and nothing is rolled back if it later refuses.

use review_logging::{review_debug, review_info};

use crate::results::ResultsView;
use crate::tree::{LeafEntry, NodeKind};
use crate::{BookmarkId, CategoryTag, Effect, ResultNode, ReviewError};

/// What an `update-listitem` replacement did to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced(BookmarkId),
    /// The edited bookmark no longer carries any issue and left the view.
    Resolved,
    /// The replacement had nothing to render.
    Dropped,
}

impl ResultsView {
    /// Only bookmarks can be removed; folders are not offered the action.
    pub fn check_removable(&self, id: &BookmarkId) -> Result<(), ReviewError> {
        self.bookmark(id).map(|_| ())
    }

    pub fn check_repairable(&self, id: &BookmarkId) -> Result<(), ReviewError> {
        if self.bookmark(id)?.tags.contains(CategoryTag::Redirect) {
            Ok(())
        } else {
            Err(ReviewError::NotARedirect(id.clone()))
        }
    }

    fn bookmark(&self, id: &BookmarkId) -> Result<&LeafEntry, ReviewError> {
        self.tree
            .get(id)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?
            .leaf()
            .ok_or_else(|| ReviewError::NotABookmark(id.clone()))
    }

    pub fn remove(&mut self, id: &BookmarkId) -> Result<Effect, ReviewError> {
        self.check_removable(id)?;
        self.tree
            .detach(id)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?;
        self.tree.propagate_visibility();
        review_info!("Removed {} from the result tree", id);
        Ok(Effect::Remove {
            bookmark_id: id.clone(),
        })
    }

    /// Same local removal as [`ResultsView::remove`]; the repaired bookmark
    /// only comes back through a later rebuild.
    pub fn repair_redirect(
        &mut self,
        id: &BookmarkId,
        new_url: &str,
    ) -> Result<Effect, ReviewError> {
        self.check_repairable(id)?;
        self.tree
            .detach(id)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?;
        self.tree.propagate_visibility();
        review_info!("Repairing redirect of {} to {}", id, new_url);
        Ok(Effect::RepairRedirect {
            bookmark_id: id.clone(),
            new_url: new_url.to_string(),
        })
    }

    /// Current title and URL of a bookmark, used to pre-fill the edit surface.
    pub fn edit_prefill(&self, id: &BookmarkId) -> Result<(String, String), ReviewError> {
        let url = self.bookmark(id)?.url.clone();
        let title = self.tree.get(id).and_then(|node| node.title.clone());
        Ok((title.unwrap_or_default(), url))
    }

    /// Structural replace of the subtree at `id` with the node the host sent
    /// back after an edit. New leaves are evaluated against the active filters.
    pub fn replace_subtree(
        &mut self,
        id: &BookmarkId,
        node: &ResultNode,
    ) -> Result<ReplaceOutcome, ReviewError> {
        let old = self
            .tree
            .get(id)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?;

        let was_flagged = matches!(&old.kind, NodeKind::Leaf(leaf) if !leaf.tags.is_empty());
        if was_flagged && node.is_leaf() && node.tags().is_empty() {
            self.tree.detach(id);
            self.tree.propagate_visibility();
            review_info!("Bookmark {} no longer has issues; removed from view", id);
            return Ok(ReplaceOutcome::Resolved);
        }

        let outcome = match self.tree.replace_subtree(id, node) {
            Some(new_id) => {
                let filters = &self.filters;
                self.tree.for_each_leaf_in_subtree_mut(&new_id, |title, leaf| {
                    filters.evaluate(title, leaf)
                });
                review_debug!("Replaced subtree {} with {}", id, new_id);
                ReplaceOutcome::Replaced(new_id)
            }
            None => {
                review_debug!("Replacement for {} had nothing to render", id);
                ReplaceOutcome::Dropped
            }
        };
        self.tree.propagate_visibility();
        Ok(outcome)
    }
}
