//! Flat review of bookmarks sharing a URL.

use review_logging::review_debug;

use crate::{BookmarkId, Effect, ReviewError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub id: BookmarkId,
    pub title: String,
    /// Folder names from the root down to the bookmark.
    pub path: Vec<String>,
    pub url: String,
}

impl DuplicateEntry {
    pub fn path_text(&self) -> String {
        self.path.join(" / ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub url: String,
    pub entries: Vec<DuplicateEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DuplicateView {
    groups: Vec<DuplicateGroup>,
}

impl DuplicateView {
    /// Keeps the engine's group order; groups without entries are skipped.
    pub fn build(groups: Vec<DuplicateGroup>) -> Self {
        let groups: Vec<DuplicateGroup> = groups
            .into_iter()
            .filter(|group| !group.entries.is_empty())
            .collect();
        review_debug!("Built duplicate view with {} groups", groups.len());
        Self { groups }
    }

    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    pub fn find(&self, id: &BookmarkId) -> Option<&DuplicateEntry> {
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .find(|entry| &entry.id == id)
    }

    fn find_mut(&mut self, id: &BookmarkId) -> Option<&mut DuplicateEntry> {
        self.groups
            .iter_mut()
            .flat_map(|group| group.entries.iter_mut())
            .find(|entry| &entry.id == id)
    }

    /// Optimistically drops the entry and requests removal from the store.
    /// A group left without entries disappears with it.
    pub fn remove(&mut self, id: &BookmarkId) -> Result<Effect, ReviewError> {
        let group_index = self
            .groups
            .iter()
            .position(|group| group.entries.iter().any(|entry| &entry.id == id))
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?;

        let group = &mut self.groups[group_index];
        group.entries.retain(|entry| &entry.id != id);
        if group.entries.is_empty() {
            self.groups.remove(group_index);
        }

        Ok(Effect::Remove {
            bookmark_id: id.clone(),
        })
    }

    /// Text-only update after the host confirmed an edit.
    pub fn retitle(
        &mut self,
        id: &BookmarkId,
        title: String,
        path: Vec<String>,
    ) -> Result<(), ReviewError> {
        let entry = self
            .find_mut(id)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone()))?;
        entry.title = title;
        entry.path = path;
        Ok(())
    }
}
