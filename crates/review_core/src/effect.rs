use crate::{BookmarkId, EditMode};

/// Outbound requests to the validation engine and the host bookmark store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Execute {
        mode: String,
    },
    Edit {
        bookmark_id: BookmarkId,
        title: String,
        url: String,
        mode: EditMode,
    },
    Remove {
        bookmark_id: BookmarkId,
    },
    RepairRedirect {
        bookmark_id: BookmarkId,
        new_url: String,
    },
}
