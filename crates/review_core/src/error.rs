use thiserror::Error;

use crate::BookmarkId;

/// Local failures of the review state machine. None of them is fatal: the
/// state machine reports them and leaves the tree as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("invalid search pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no entry with id {0}")]
    UnknownNode(BookmarkId),

    #[error("entry {0} is a folder, not a bookmark")]
    NotABookmark(BookmarkId),

    #[error("bookmark {0} is not a redirect")]
    NotARedirect(BookmarkId),

    #[error("a validation run is already in progress")]
    RunInProgress,

    #[error("{action} is not available in the {pane} view")]
    ModeMismatch {
        action: &'static str,
        pane: &'static str,
    },

    #[error("bulk actions are not offered for this run")]
    BulkActionsUnavailable,

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("nothing is waiting for {0}")]
    NothingPending(&'static str),
}
