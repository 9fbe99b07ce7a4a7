//! Layout manager: the in-memory editor host.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use ropey::Rope;

use paneorg_core::{EditorHost, FileId, HostEvent, PaneId, SplitRequest};

use crate::pane_group::{FileTab, PaneGroup};

/// Content handed to the layout when a file is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentText {
    /// Text loaded into memory
    Loaded(String),
    /// No in-memory document exists for the file
    Missing,
    /// Reading the document failed
    Unreadable(String),
}

#[derive(Debug)]
enum Content {
    Text(Rope),
    Missing,
    Unreadable(String),
}

impl From<DocumentText> for Content {
    fn from(text: DocumentText) -> Self {
        match text {
            DocumentText::Loaded(text) => Content::Text(Rope::from_str(&text)),
            DocumentText::Missing => Content::Missing,
            DocumentText::Unreadable(reason) => Content::Unreadable(reason),
        }
    }
}

#[derive(Debug)]
struct Document {
    path: PathBuf,
    content: Content,
}

/// Editor pane layout: a row of pane groups plus the documents they show.
///
/// Panes keep their ids for their whole life; a pane whose last tab is
/// closed is removed.
#[derive(Debug, Default)]
pub struct LayoutManager {
    pane_groups: Vec<PaneGroup>,
    /// Current focus (active group index).
    focus: usize,
    documents: BTreeMap<FileId, Document>,
    next_file_id: u64,
    next_pane_id: u64,
    events: Vec<HostEvent>,
}

impl LayoutManager {
    /// Create new empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document without opening it. Re-registering a known path
    /// replaces its content and keeps its id.
    pub fn register_document(&mut self, path: impl Into<PathBuf>, text: DocumentText) -> FileId {
        let path = path.into();
        if let Some(file) = self.find_file(&path) {
            self.set_document_text(file, text);
            return file;
        }

        self.next_file_id += 1;
        let file = FileId(self.next_file_id);
        self.documents.insert(
            file,
            Document {
                path,
                content: text.into(),
            },
        );
        file
    }

    /// Register a document and open it in the current pane, the way a user
    /// opens a file.
    pub fn open_path(&mut self, path: impl Into<PathBuf>, text: DocumentText) -> Result<FileId> {
        let file = self.register_document(path, text);
        self.open_file(file, None, true)?;
        Ok(file)
    }

    /// Find a registered document by path.
    pub fn find_file(&self, path: &Path) -> Option<FileId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.path == path)
            .map(|(file, _)| *file)
    }

    /// Replace a document's in-memory content.
    pub fn set_document_text(&mut self, file: FileId, text: DocumentText) -> bool {
        match self.documents.get_mut(&file) {
            Some(doc) => {
                doc.content = text.into();
                true
            }
            None => false,
        }
    }

    /// Close the file in every pane.
    pub fn close_everywhere(&mut self, file: FileId) {
        let panes: Vec<PaneId> = self
            .pane_groups
            .iter()
            .filter(|group| group.contains(file))
            .map(|group| group.id())
            .collect();
        for pane in panes {
            self.close_file(pane, file);
        }
    }

    /// Focus a pane. Returns `false` for unknown panes.
    pub fn focus_pane(&mut self, pane: PaneId) -> bool {
        match self.pane_index(pane) {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    /// Take queued host events.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pane group by id.
    pub fn pane(&self, pane: PaneId) -> Option<&PaneGroup> {
        self.pane_groups.iter().find(|group| group.id() == pane)
    }

    /// Get all pane groups in order.
    pub fn pane_groups(&self) -> &[PaneGroup] {
        &self.pane_groups
    }

    /// Panes currently showing `file`.
    pub fn panes_showing(&self, file: FileId) -> Vec<PaneId> {
        self.pane_groups
            .iter()
            .filter(|group| group.contains(file))
            .map(|group| group.id())
            .collect()
    }

    /// Caret of the file's tab in `pane`.
    pub fn caret_in(&self, pane: PaneId, file: FileId) -> Option<usize> {
        self.pane(pane)?
            .tabs()
            .iter()
            .find(|tab| tab.file == file)
            .map(|tab| tab.caret)
    }

    /// One line per pane: focus marker, pane id, file names (active tab
    /// marked with `>`).
    pub fn summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.pane_groups.len());
        for (index, group) in self.pane_groups.iter().enumerate() {
            let marker = if index == self.focus { '*' } else { ' ' };
            let names: Vec<String> = group
                .tabs()
                .iter()
                .enumerate()
                .map(|(tab_index, tab)| {
                    let name = self.display_name(tab.file);
                    if tab_index == group.active_index() {
                        format!(">{}", name)
                    } else {
                        name
                    }
                })
                .collect();
            lines.push(format!("{}{}: {}", marker, group.id(), names.join(", ")));
        }
        if lines.is_empty() {
            "(no panes)".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn display_name(&self, file: FileId) -> String {
        self.documents
            .get(&file)
            .and_then(|doc| doc.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string())
    }

    fn pane_index(&self, pane: PaneId) -> Option<usize> {
        self.pane_groups.iter().position(|group| group.id() == pane)
    }

    fn new_pane_id(&mut self) -> PaneId {
        self.next_pane_id += 1;
        PaneId(self.next_pane_id)
    }

    /// Remove group at `index` and keep focus on the same group where possible.
    fn remove_group(&mut self, index: usize) {
        self.pane_groups.remove(index);
        if self.focus > index || self.focus >= self.pane_groups.len() {
            self.focus = self.focus.saturating_sub(1);
        }
    }

    /// Insert group at `index` and keep focus on the same group.
    fn insert_group(&mut self, index: usize, group: PaneGroup) {
        self.pane_groups.insert(index, group);
        if self.pane_groups.len() > 1 && self.focus >= index {
            self.focus += 1;
        }
    }

    fn text_len(&self, file: FileId) -> Option<usize> {
        match &self.documents.get(&file)?.content {
            Content::Text(rope) => Some(rope.len_chars()),
            _ => None,
        }
    }
}

impl EditorHost for LayoutManager {
    fn current_pane(&self) -> Option<PaneId> {
        self.pane_groups.get(self.focus).map(|group| group.id())
    }

    fn panes(&self) -> Vec<PaneId> {
        self.pane_groups.iter().map(|group| group.id()).collect()
    }

    fn pane_files(&self, pane: PaneId) -> Vec<FileId> {
        self.pane(pane).map(|group| group.files()).unwrap_or_default()
    }

    fn file_path(&self, file: FileId) -> Option<PathBuf> {
        self.documents.get(&file).map(|doc| doc.path.clone())
    }

    fn is_file_open(&self, file: FileId) -> bool {
        self.pane_groups.iter().any(|group| group.contains(file))
    }

    fn document_text(&self, file: FileId) -> Result<Option<String>> {
        let doc = match self.documents.get(&file) {
            Some(doc) => doc,
            None => return Ok(None),
        };
        match &doc.content {
            Content::Text(rope) => Ok(Some(rope.to_string())),
            Content::Missing => Ok(None),
            Content::Unreadable(reason) => Err(anyhow!(
                "Cannot read {}: {}",
                doc.path.display(),
                reason
            )),
        }
    }

    fn selected_caret(&self, file: FileId) -> Option<usize> {
        let tab = self.pane_groups.get(self.focus)?.active_tab()?;
        (tab.file == file).then_some(tab.caret)
    }

    fn close_file(&mut self, pane: PaneId, file: FileId) {
        let Some(index) = self.pane_index(pane) else {
            return;
        };
        let group = &mut self.pane_groups[index];
        if group.remove_tab(file).is_some() && group.is_empty() {
            self.remove_group(index);
        }
    }

    fn open_file(&mut self, file: FileId, pane: Option<PaneId>, focus: bool) -> Result<PaneId> {
        if !self.documents.contains_key(&file) {
            bail!("Unknown {}", file);
        }

        let index = match pane {
            Some(pane) => self
                .pane_index(pane)
                .ok_or_else(|| anyhow!("Unknown {}", pane))?,
            None if self.pane_groups.is_empty() => {
                let id = self.new_pane_id();
                self.pane_groups.push(PaneGroup::new(id, FileTab::new(file)));
                self.focus = 0;
                self.events.push(HostEvent::FileOpened(file));
                return Ok(id);
            }
            None => self.focus,
        };

        let group = &mut self.pane_groups[index];
        match group.position(file) {
            Some(position) => group.set_active(position),
            None => {
                group.add_tab(FileTab::new(file));
                self.events.push(HostEvent::FileOpened(file));
            }
        }
        let id = group.id();

        if focus {
            self.focus = index;
        }
        Ok(id)
    }

    fn split(&mut self, pane: PaneId, request: SplitRequest) -> Option<PaneId> {
        let index = self.pane_index(pane)?;
        if !self.documents.contains_key(&request.file) {
            return None;
        }

        // Without force, reuse the neighbouring pane.
        if !request.force && index + 1 < self.pane_groups.len() {
            let neighbour = self.pane_groups[index + 1].id();
            return self
                .open_file(request.file, Some(neighbour), request.focus_new)
                .ok();
        }

        let id = self.new_pane_id();
        let mut group = PaneGroup::new(id, FileTab::new(request.file));
        group.direction = Some(request.direction);
        self.insert_group(index + 1, group);
        self.events.push(HostEvent::FileOpened(request.file));

        if request.focus_new {
            self.focus = index + 1;
        }
        Some(id)
    }

    fn move_caret(&mut self, file: FileId, offset: usize) -> bool {
        let offset = match self.text_len(file) {
            Some(len) => offset.min(len),
            None => offset,
        };

        // Selected editor: the focused pane's tab first, then any pane.
        let focused_has_file = self
            .pane_groups
            .get(self.focus)
            .map(|group| group.contains(file))
            .unwrap_or(false);
        let index = if focused_has_file {
            Some(self.focus)
        } else {
            self.pane_groups.iter().position(|group| group.contains(file))
        };

        match index.and_then(|index| self.pane_groups[index].tab_mut(file)) {
            Some(tab) => {
                tab.caret = offset;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneorg_core::SplitDirection;

    fn loaded(text: &str) -> DocumentText {
        DocumentText::Loaded(text.to_string())
    }

    fn split_request(file: FileId) -> SplitRequest {
        SplitRequest {
            direction: SplitDirection::Vertical,
            force: true,
            file,
            focus_new: true,
        }
    }

    #[test]
    fn test_first_open_creates_pane() {
        let mut layout = LayoutManager::new();
        assert_eq!(layout.current_pane(), None);

        let file = layout.open_path("/src/a.cpp", loaded("int a;")).unwrap();
        let pane = layout.current_pane().unwrap();

        assert_eq!(layout.panes(), vec![pane]);
        assert_eq!(layout.pane_files(pane), vec![file]);
        assert_eq!(layout.take_events(), vec![HostEvent::FileOpened(file)]);
        assert!(layout.take_events().is_empty());
    }

    #[test]
    fn test_reopen_same_file_focuses_existing_tab() {
        let mut layout = LayoutManager::new();
        let a = layout.open_path("/src/a.cpp", loaded("")).unwrap();
        let b = layout.open_path("/src/b.cpp", loaded("")).unwrap();
        layout.take_events();

        let again = layout.open_path("/src/a.cpp", loaded("")).unwrap();
        assert_eq!(again, a);

        let pane = layout.current_pane().unwrap();
        assert_eq!(layout.pane_files(pane), vec![a, b]);
        assert_eq!(layout.selected_caret(a), Some(0));
        assert!(layout.take_events().is_empty());
    }

    #[test]
    fn test_split_inserts_after_source_and_focuses() {
        let mut layout = LayoutManager::new();
        let a = layout.open_path("/src/a.cpp", loaded("")).unwrap();
        let h = layout.register_document("/src/a.h", loaded(""));
        let first = layout.current_pane().unwrap();

        let second = layout.split(first, split_request(h)).unwrap();

        assert_eq!(layout.panes(), vec![first, second]);
        assert_eq!(layout.current_pane(), Some(second));
        assert_eq!(layout.pane_files(first), vec![a]);
        assert_eq!(layout.pane_files(second), vec![h]);
        assert_eq!(
            layout.pane(second).unwrap().direction,
            Some(SplitDirection::Vertical)
        );
    }

    #[test]
    fn test_split_without_force_reuses_neighbour() {
        let mut layout = LayoutManager::new();
        layout.open_path("/src/a.cpp", loaded("")).unwrap();
        let first = layout.current_pane().unwrap();
        let h = layout.register_document("/src/a.h", loaded(""));
        let second = layout.split(first, split_request(h)).unwrap();
        layout.focus_pane(first);

        let b = layout.register_document("/src/b.h", loaded(""));
        let request = SplitRequest {
            force: false,
            ..split_request(b)
        };
        assert_eq!(layout.split(first, request), Some(second));
        assert_eq!(layout.panes().len(), 2);
        assert_eq!(layout.pane_files(second), vec![h, b]);
    }

    #[test]
    fn test_split_unknown_pane_fails() {
        let mut layout = LayoutManager::new();
        let file = layout.register_document("/src/a.h", loaded(""));
        assert_eq!(layout.split(PaneId(42), split_request(file)), None);
    }

    #[test]
    fn test_closing_last_tab_removes_pane() {
        let mut layout = LayoutManager::new();
        layout.open_path("/src/a.cpp", loaded("")).unwrap();
        let first = layout.current_pane().unwrap();
        let h = layout.register_document("/src/a.h", loaded(""));
        let second = layout.split(first, split_request(h)).unwrap();

        layout.close_file(second, h);

        assert_eq!(layout.panes(), vec![first]);
        assert_eq!(layout.current_pane(), Some(first));
        assert!(!layout.is_file_open(h));
        assert_eq!(layout.file_path(h), Some(PathBuf::from("/src/a.h")));
    }

    #[test]
    fn test_focus_follows_group_when_earlier_pane_removed() {
        let mut layout = LayoutManager::new();
        let a = layout.open_path("/src/a.cpp", loaded("")).unwrap();
        let first = layout.current_pane().unwrap();
        let h = layout.register_document("/src/a.h", loaded(""));
        let second = layout.split(first, split_request(h)).unwrap();

        layout.close_file(first, a);
        assert_eq!(layout.current_pane(), Some(second));
    }

    #[test]
    fn test_selected_caret_only_for_focused_active_tab() {
        let mut layout = LayoutManager::new();
        let a = layout.open_path("/src/a.cpp", loaded("int main() {}")).unwrap();
        assert!(layout.move_caret(a, 4));
        assert_eq!(layout.selected_caret(a), Some(4));

        let b = layout.open_path("/src/b.cpp", loaded("")).unwrap();
        assert_eq!(layout.selected_caret(a), None);
        assert_eq!(layout.selected_caret(b), Some(0));
    }

    #[test]
    fn test_move_caret_clamps_to_text() {
        let mut layout = LayoutManager::new();
        let a = layout.open_path("/src/a.cpp", loaded("héllo")).unwrap();
        assert!(layout.move_caret(a, 100));
        assert_eq!(layout.selected_caret(a), Some(5));
    }

    #[test]
    fn test_move_caret_on_closed_file() {
        let mut layout = LayoutManager::new();
        let a = layout.register_document("/src/a.cpp", loaded(""));
        assert!(!layout.move_caret(a, 0));
    }

    #[test]
    fn test_document_text_states() {
        let mut layout = LayoutManager::new();
        let loaded_file = layout.register_document("/a.cpp", loaded("x"));
        let missing = layout.register_document("/b.cpp", DocumentText::Missing);
        let broken =
            layout.register_document("/c.cpp", DocumentText::Unreadable("invalid UTF-8".into()));

        assert_eq!(layout.document_text(loaded_file).unwrap().as_deref(), Some("x"));
        assert_eq!(layout.document_text(missing).unwrap(), None);
        assert_eq!(layout.document_text(FileId(999)).unwrap(), None);
        let err = layout.document_text(broken).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_register_same_path_replaces_text() {
        let mut layout = LayoutManager::new();
        let first = layout.register_document("/a.h", loaded("$NAME$"));
        let second = layout.register_document("/a.h", loaded("#pragma once"));

        assert_eq!(first, second);
        assert_eq!(
            layout.document_text(first).unwrap().as_deref(),
            Some("#pragma once")
        );
    }

    #[test]
    fn test_open_unknown_file_fails() {
        let mut layout = LayoutManager::new();
        assert!(layout.open_file(FileId(7), None, true).is_err());
    }

    #[test]
    fn test_summary() {
        let mut layout = LayoutManager::new();
        assert_eq!(layout.summary(), "(no panes)");

        layout.open_path("/src/a.cpp", loaded("")).unwrap();
        layout.open_path("/src/b.cpp", loaded("")).unwrap();
        let first = layout.current_pane().unwrap();
        let h = layout.register_document("/src/a.h", loaded(""));
        layout.split(first, split_request(h)).unwrap();

        assert_eq!(layout.summary(), " pane#1: a.cpp, >b.cpp\n*pane#2: >a.h");
    }
}
