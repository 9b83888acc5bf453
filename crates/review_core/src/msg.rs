use crate::{
    Action, BookmarkId, CategoryTag, CounterSnapshot, DuplicateGroup, ResultNode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Engine announced a new run and its bookmark total.
    TotalBookmarks { total: u64 },
    /// Engine streamed absolute counter values.
    CountersUpdated(CounterSnapshot),
    /// Engine finished a validation run.
    Finished {
        bookmarks: Vec<ResultNode>,
        /// Debug payload entries, each already rendered as JSON text.
        debug: Vec<String>,
    },
    /// Engine finished a duplicate scan.
    DuplicatesReported {
        warnings: u64,
        groups: Vec<DuplicateGroup>,
    },
    /// Host store applied an edit and sent back the new state of the entry.
    ListItemUpdated {
        bookmark_id: BookmarkId,
        update: ListItemUpdate,
    },
    /// User asked for a new run.
    StartClicked { mode: String },
    /// User typed in the search field.
    SearchChanged(String),
    /// User flipped a category checkbox.
    CategoryToggled { tag: CategoryTag, enabled: bool },
    /// User clicked an action on a single entry.
    ActionRequested(Action),
    /// User answered the pending confirmation prompt.
    ConfirmationAnswered(bool),
    /// User confirmed the edit surface.
    EditSubmitted { title: String, url: String },
    /// User dismissed the edit surface.
    EditCancelled,
    RepairAllRedirectsClicked,
    RemoveAllErrorsClicked,
    /// The result view was closed.
    ViewClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItemUpdate {
    /// Tree mode: the whole subtree is rendered again from this node.
    Replace(ResultNode),
    /// Duplicate mode: only the shown title and folder path change.
    Retitle { title: String, path: Vec<String> },
}
