use crate::tree::ViewTree;
use crate::{
    Affordances, BookmarkId, BookmarkStatus, CategorySet, CategoryTag, DuplicateGroup,
    EditSurface, PendingConfirmation, RunCounters, RunPhase,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: RunPhase,
    pub start_enabled: bool,
    pub counters: RunCounters,
    pub affordances: Affordances,
    pub debug_output: Option<String>,
    pub search_pattern: String,
    pub categories: Vec<(CategoryTag, bool)>,
    /// Visible tree rows in view order.
    pub rows: Vec<TreeRowView>,
    pub duplicates: Vec<DuplicateGroup>,
    pub pending: Option<PendingConfirmation>,
    pub edit: Option<EditSurface>,
    pub last_condition: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn row(&self, id: &BookmarkId) -> Option<&TreeRowView> {
        self.rows.iter().find(|row| &row.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRowView {
    pub id: BookmarkId,
    pub depth: usize,
    pub title: String,
    /// `title` holds the placeholder because the bookmark has none.
    pub untitled: bool,
    pub is_folder: bool,
    pub url: Option<String>,
    pub status: Option<BookmarkStatus>,
    pub new_url: Option<String>,
    pub tags: CategorySet,
}

pub(crate) fn tree_rows(tree: &ViewTree) -> Vec<TreeRowView> {
    let mut rows = Vec::new();
    tree.walk(|node, depth| {
        if !node.is_visible() {
            return false;
        }
        let leaf = node.leaf();
        rows.push(TreeRowView {
            id: node.id.clone(),
            depth,
            title: node.display_title().to_string(),
            untitled: node.is_untitled(),
            is_folder: leaf.is_none(),
            url: leaf.map(|leaf| leaf.url.clone()),
            status: leaf.and_then(|leaf| leaf.status),
            new_url: leaf.and_then(|leaf| leaf.new_url.clone()),
            tags: leaf.map(|leaf| leaf.tags).unwrap_or_default(),
        });
        true
    });
    rows
}
