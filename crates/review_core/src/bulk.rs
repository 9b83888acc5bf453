use review_logging::{review_info, review_warn};

use crate::results::ResultsView;
use crate::{BookmarkId, CategoryTag, Effect};

impl ResultsView {
    /// Visible bookmarks carrying `tag`, in view order. Anything hidden by the
    /// active filters, directly or through a hidden folder, is left out.
    pub fn visible_leaves_tagged(&self, tag: CategoryTag) -> Vec<BookmarkId> {
        let mut ids = Vec::new();
        self.tree.walk(|node, _depth| {
            if !node.is_visible() {
                return false;
            }
            if let Some(leaf) = node.leaf() {
                if leaf.tags.contains(tag) {
                    ids.push(node.id.clone());
                }
            }
            true
        });
        ids
    }

    pub fn repair_all_visible_redirects(&mut self) -> Vec<Effect> {
        let targets: Vec<(BookmarkId, Option<String>)> = self
            .visible_leaves_tagged(CategoryTag::Redirect)
            .into_iter()
            .map(|id| {
                let new_url = self
                    .tree
                    .get(&id)
                    .and_then(|node| node.leaf())
                    .and_then(|leaf| leaf.new_url.clone());
                (id, new_url)
            })
            .collect();

        let mut effects = Vec::with_capacity(targets.len());
        for (id, new_url) in targets {
            let Some(new_url) = new_url else {
                review_warn!("Redirect {} has no target URL; skipping repair", id);
                continue;
            };
            self.tree.detach(&id);
            effects.push(Effect::RepairRedirect {
                bookmark_id: id,
                new_url,
            });
        }
        self.tree.propagate_visibility();
        review_info!("Bulk repair requested for {} redirects", effects.len());
        effects
    }

    pub fn remove_all_visible_errors(&mut self) -> Vec<Effect> {
        let targets = self.visible_leaves_tagged(CategoryTag::Error);
        let mut effects = Vec::with_capacity(targets.len());
        for id in targets {
            self.tree.detach(&id);
            effects.push(Effect::Remove { bookmark_id: id });
        }
        self.tree.propagate_visibility();
        review_info!("Bulk removal requested for {} bookmarks", effects.len());
        effects
    }
}
