//! Pane group: one editor split holding a row of file tabs.

use paneorg_core::{FileId, PaneId, SplitDirection};

/// File tab inside a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTab {
    pub file: FileId,
    /// Caret offset in chars
    pub caret: usize,
}

impl FileTab {
    /// Create tab with caret at the start of the file.
    pub fn new(file: FileId) -> Self {
        Self { file, caret: 0 }
    }
}

/// Group of file tabs shown in one pane.
#[derive(Debug, Clone)]
pub struct PaneGroup {
    id: PaneId,
    tabs: Vec<FileTab>,
    active_index: usize,
    /// Divider between this pane and the previous one (None for the first pane).
    pub direction: Option<SplitDirection>,
}

impl PaneGroup {
    /// Create new group with single tab.
    pub fn new(id: PaneId, tab: FileTab) -> Self {
        Self {
            id,
            tabs: vec![tab],
            active_index: 0,
            direction: None,
        }
    }

    /// Pane handle.
    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Add tab to group and make it active.
    pub fn add_tab(&mut self, tab: FileTab) {
        self.tabs.push(tab);
        self.active_index = self.tabs.len() - 1;
    }

    /// Remove the tab showing `file`.
    pub fn remove_tab(&mut self, file: FileId) -> Option<FileTab> {
        let index = self.position(file)?;
        let tab = self.tabs.remove(index);

        // Adjust active_index
        if self.tabs.is_empty() {
            self.active_index = 0;
        } else if self.active_index > index || self.active_index >= self.tabs.len() {
            self.active_index = self.active_index.saturating_sub(1);
        }

        Some(tab)
    }

    /// Index of the tab showing `file`.
    pub fn position(&self, file: FileId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.file == file)
    }

    /// Check if the group shows `file`.
    pub fn contains(&self, file: FileId) -> bool {
        self.position(file).is_some()
    }

    /// Set active tab by index.
    pub fn set_active(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_index = index;
        }
    }

    /// Get active tab index.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Get active tab.
    pub fn active_tab(&self) -> Option<&FileTab> {
        self.tabs.get(self.active_index)
    }

    /// Get mutable reference to the tab showing `file`.
    pub fn tab_mut(&mut self, file: FileId) -> Option<&mut FileTab> {
        self.tabs.iter_mut().find(|tab| tab.file == file)
    }

    /// Get reference to tabs.
    pub fn tabs(&self) -> &[FileTab] {
        &self.tabs
    }

    /// Files in tab order.
    pub fn files(&self) -> Vec<FileId> {
        self.tabs.iter().map(|tab| tab.file).collect()
    }

    /// Get number of tabs in group.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Check if group is empty.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(files: &[u64]) -> PaneGroup {
        let mut group = PaneGroup::new(PaneId(1), FileTab::new(FileId(files[0])));
        for &file in &files[1..] {
            group.add_tab(FileTab::new(FileId(file)));
        }
        group
    }

    #[test]
    fn test_add_tab_activates_it() {
        let group = group_with(&[1, 2, 3]);
        assert_eq!(group.len(), 3);
        assert_eq!(group.active_index(), 2);
        assert_eq!(group.active_tab().map(|t| t.file), Some(FileId(3)));
    }

    #[test]
    fn test_remove_tab_before_active_keeps_active_file() {
        let mut group = group_with(&[1, 2, 3]);
        group.set_active(2);

        assert_eq!(group.remove_tab(FileId(1)).map(|t| t.file), Some(FileId(1)));
        assert_eq!(group.active_tab().map(|t| t.file), Some(FileId(3)));
    }

    #[test]
    fn test_remove_active_last_tab() {
        let mut group = group_with(&[1, 2]);
        group.remove_tab(FileId(2));
        assert_eq!(group.active_index(), 0);
        assert_eq!(group.files(), vec![FileId(1)]);
    }

    #[test]
    fn test_remove_missing_tab() {
        let mut group = group_with(&[1]);
        assert!(group.remove_tab(FileId(9)).is_none());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_remove_all_tabs() {
        let mut group = group_with(&[1]);
        group.remove_tab(FileId(1));
        assert!(group.is_empty());
        assert!(group.active_tab().is_none());
    }
}
