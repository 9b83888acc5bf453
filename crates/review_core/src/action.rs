use crate::BookmarkId;

/// Which surface an edit belongs to; echoed back by the host in `update-listitem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Default,
    Duplicate,
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Default => "default",
            EditMode::Duplicate => "duplicate",
        }
    }

    /// Anything other than `"duplicate"` is the regular tree edit.
    pub fn from_wire(mode: &str) -> Self {
        if mode == "duplicate" {
            EditMode::Duplicate
        } else {
            EditMode::Default
        }
    }
}

/// A user action on a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Remove { id: BookmarkId },
    Edit { id: BookmarkId, mode: EditMode },
    RepairRedirect { id: BookmarkId, new_url: String },
}

impl Action {
    pub fn id(&self) -> &BookmarkId {
        match self {
            Action::Remove { id } | Action::Edit { id, .. } | Action::RepairRedirect { id, .. } => {
                id
            }
        }
    }

    /// Destructive actions wait for an explicit confirmation.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Action::Remove { .. } | Action::RepairRedirect { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Remove { .. } => "remove",
            Action::Edit { .. } => "edit",
            Action::RepairRedirect { .. } => "repair-redirect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    RepairAllRedirects,
    RemoveAllErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirmation {
    Single(Action),
    Bulk(BulkAction),
}
