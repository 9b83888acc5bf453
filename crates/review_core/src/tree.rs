//! Display tree built from a validation result.
//!
//! Nodes live in an `id -> node` index; folders keep the ordered ids of their
//! children and every node knows its parent, so mutations are O(1) lookups
//! followed by a local splice. Folder visibility is never set directly: it is
//! derived from leaf visibility by [`ViewTree::propagate_visibility`].

use std::collections::{HashMap, HashSet};

use review_logging::{review_debug, review_warn};

use crate::{BookmarkId, BookmarkStatus, CategorySet, ResultNode};

/// Shown in place of a missing or empty title.
pub const NO_TITLE_PLACEHOLDER: &str = "(no title)";

pub fn display_title(title: Option<&str>) -> &str {
    title
        .filter(|title| !title.is_empty())
        .unwrap_or(NO_TITLE_PLACEHOLDER)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafEntry {
    pub url: String,
    pub status: Option<BookmarkStatus>,
    pub new_url: Option<String>,
    pub tags: CategorySet,
    pub search_match: bool,
    pub category_match: bool,
}

impl LeafEntry {
    pub fn is_visible(&self) -> bool {
        self.search_match && self.category_match
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(LeafEntry),
    Folder {
        children: Vec<BookmarkId>,
        visible: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub id: BookmarkId,
    pub title: Option<String>,
    pub parent: Option<BookmarkId>,
    pub kind: NodeKind,
}

impl ViewNode {
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref())
    }

    /// True when the placeholder stands in for the title.
    pub fn is_untitled(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
    }

    pub fn is_visible(&self) -> bool {
        match &self.kind {
            NodeKind::Leaf(leaf) => leaf.is_visible(),
            NodeKind::Folder { visible, .. } => *visible,
        }
    }

    pub fn leaf(&self) -> Option<&LeafEntry> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> &[BookmarkId] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Folder { children, .. } => children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewTree {
    roots: Vec<BookmarkId>,
    nodes: HashMap<BookmarkId, ViewNode>,
}

/// Builds the display tree. Folders without any surviving bookmark below
/// them are dropped; every leaf starts out matching both filters.
pub fn build_tree(nodes: &[ResultNode]) -> ViewTree {
    let mut tree = ViewTree::default();
    for node in nodes {
        if let Some(id) = tree.insert_subtree(node, None) {
            tree.roots.push(id);
        }
    }
    tree.propagate_visibility();
    review_debug!(
        "Built result tree: {} roots, {} nodes",
        tree.roots.len(),
        tree.nodes.len()
    );
    tree
}

impl ViewTree {
    pub fn roots(&self) -> &[BookmarkId] {
        &self.roots
    }

    pub fn get(&self, id: &BookmarkId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &BookmarkId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk in view order. `visit` returns whether to descend.
    pub fn walk(&self, mut visit: impl FnMut(&ViewNode, usize) -> bool) {
        for root in &self.roots {
            self.walk_from(root, 0, &mut visit);
        }
    }

    fn walk_from(
        &self,
        id: &BookmarkId,
        depth: usize,
        visit: &mut impl FnMut(&ViewNode, usize) -> bool,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if visit(node, depth) {
            for child in node.children() {
                self.walk_from(child, depth + 1, visit);
            }
        }
    }

    /// Recomputes every folder: visible iff some bookmark below it, at any
    /// depth, is visible. One post-order pass over the whole tree.
    pub fn propagate_visibility(&mut self) {
        let mut folders = Vec::new();
        for root in &self.roots {
            self.collect_folder_visibility(root, &mut folders);
        }
        for (id, now_visible) in folders {
            if let Some(ViewNode {
                kind: NodeKind::Folder { visible, .. },
                ..
            }) = self.nodes.get_mut(&id)
            {
                *visible = now_visible;
            }
        }
    }

    fn collect_folder_visibility(
        &self,
        id: &BookmarkId,
        out: &mut Vec<(BookmarkId, bool)>,
    ) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        match &node.kind {
            NodeKind::Leaf(leaf) => leaf.is_visible(),
            NodeKind::Folder { children, .. } => {
                let mut any_visible = false;
                // No short-circuit: nested folders need their own result.
                for child in children {
                    any_visible |= self.collect_folder_visibility(child, out);
                }
                out.push((id.clone(), any_visible));
                any_visible
            }
        }
    }

    pub(crate) fn for_each_leaf_mut(&mut self, mut f: impl FnMut(&str, &mut LeafEntry)) {
        for node in self.nodes.values_mut() {
            let ViewNode { title, kind, .. } = node;
            if let NodeKind::Leaf(leaf) = kind {
                f(display_title(title.as_deref()), leaf);
            }
        }
    }

    pub(crate) fn for_each_leaf_in_subtree_mut(
        &mut self,
        root: &BookmarkId,
        mut f: impl FnMut(&str, &mut LeafEntry),
    ) {
        for id in self.subtree_ids(root) {
            if let Some(ViewNode {
                title,
                kind: NodeKind::Leaf(leaf),
                ..
            }) = self.nodes.get_mut(&id)
            {
                f(display_title(title.as_deref()), leaf);
            }
        }
    }

    fn subtree_ids(&self, root: &BookmarkId) -> Vec<BookmarkId> {
        let mut ids = Vec::new();
        let mut stack = vec![root.clone()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children().iter().cloned());
                ids.push(id);
            }
        }
        ids
    }

    fn sibling_list_mut(&mut self, parent: Option<&BookmarkId>) -> Option<&mut Vec<BookmarkId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(ViewNode {
                    kind: NodeKind::Folder { children, .. },
                    ..
                }) => Some(children),
                _ => None,
            },
        }
    }

    /// Detaches `id` from its parent and drops it together with its subtree.
    /// Structural only; callers decide when to propagate visibility.
    pub fn detach(&mut self, id: &BookmarkId) -> Option<ViewNode> {
        let parent = self.nodes.get(id)?.parent.clone();
        if let Some(siblings) = self.sibling_list_mut(parent.as_ref()) {
            siblings.retain(|sibling| sibling != id);
        }
        for descendant in self.subtree_ids(id) {
            if &descendant != id {
                self.nodes.remove(&descendant);
            }
        }
        self.nodes.remove(id)
    }

    /// Swaps the subtree at `id` for a freshly built one in the same slot.
    /// Returns the id now occupying the slot, or `None` when the replacement
    /// had nothing renderable and the slot was removed.
    pub fn replace_subtree(&mut self, id: &BookmarkId, node: &ResultNode) -> Option<BookmarkId> {
        let parent = self.nodes.get(id)?.parent.clone();
        let position = self
            .sibling_list_mut(parent.as_ref())
            .and_then(|siblings| siblings.iter().position(|sibling| sibling == id));

        for descendant in self.subtree_ids(id) {
            self.nodes.remove(&descendant);
        }
        let inserted = self.insert_subtree(node, parent.as_ref());

        if let (Some(siblings), Some(position)) =
            (self.sibling_list_mut(parent.as_ref()), position)
        {
            match &inserted {
                Some(new_id) => siblings[position] = new_id.clone(),
                None => {
                    siblings.remove(position);
                }
            }
        }
        inserted
    }

    fn insert_subtree(&mut self, node: &ResultNode, parent: Option<&BookmarkId>) -> Option<BookmarkId> {
        let mut ancestors = HashSet::new();
        self.insert_node(node, parent, &mut ancestors)
    }

    /// `ancestors` holds the ids of folders still being built above `node`;
    /// they are not in `nodes` yet, so a descendant reusing one must be caught here.
    fn insert_node(
        &mut self,
        node: &ResultNode,
        parent: Option<&BookmarkId>,
        ancestors: &mut HashSet<BookmarkId>,
    ) -> Option<BookmarkId> {
        if self.nodes.contains_key(&node.id) || ancestors.contains(&node.id) {
            review_warn!("Skipping node with duplicate id {}", node.id);
            return None;
        }

        let kind = match node.bookmark_url() {
            Some(url) => {
                if !node.children.is_empty() {
                    review_debug!("Ignoring children of bookmark {}", node.id);
                }
                NodeKind::Leaf(LeafEntry {
                    url: url.to_string(),
                    status: node.status,
                    new_url: node.new_url.clone(),
                    tags: node.tags(),
                    search_match: true,
                    category_match: true,
                })
            }
            None => {
                ancestors.insert(node.id.clone());
                let children: Vec<BookmarkId> = node
                    .children
                    .iter()
                    .filter_map(|child| self.insert_node(child, Some(&node.id), ancestors))
                    .collect();
                ancestors.remove(&node.id);
                if children.is_empty() {
                    return None;
                }
                NodeKind::Folder {
                    children,
                    visible: true,
                }
            }
        };

        self.nodes.insert(
            node.id.clone(),
            ViewNode {
                id: node.id.clone(),
                title: node.title.clone(),
                parent: parent.cloned(),
                kind,
            },
        );
        Some(node.id.clone())
    }
}
