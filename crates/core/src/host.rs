//! Editor host capability trait.
//!
//! The organizer never touches concrete editor types. Everything it needs
//! from the editor (pane queries, file text, caret, and the close/open/split
//! commands) goes through [`EditorHost`], so any editor can bind to it.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

/// Handle of an open file, stable for as long as the host keeps the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

/// Handle of an editor pane (split/group), stable until the pane is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// Split direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

/// Parameters of a pane split command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRequest {
    /// Orientation of the new divider
    pub direction: SplitDirection,
    /// Split even if an adjacent pane already exists
    pub force: bool,
    /// File shown in the new pane
    pub file: FileId,
    /// Move focus to the new pane
    pub focus_new: bool,
}

/// Operations the organizer performs against an editor.
///
/// All methods are called on the host's main execution context.
pub trait EditorHost {
    // === Queries ===

    /// Currently focused pane, `None` when the editor area is empty.
    fn current_pane(&self) -> Option<PaneId>;

    /// All panes in host order.
    fn panes(&self) -> Vec<PaneId>;

    /// Files shown in `pane`, in tab order.
    fn pane_files(&self, pane: PaneId) -> Vec<FileId>;

    /// Path of an open file.
    fn file_path(&self, file: FileId) -> Option<PathBuf>;

    /// Whether the file handle still refers to an open file.
    fn is_file_open(&self, file: FileId) -> bool;

    /// In-memory text of the file (may differ from disk when unsaved).
    ///
    /// `Ok(None)` when the host has no in-memory document for the file.
    fn document_text(&self, file: FileId) -> Result<Option<String>>;

    /// Caret offset of the selected text editor, if it shows `file`.
    fn selected_caret(&self, file: FileId) -> Option<usize>;

    // === Commands ===

    /// Close the file's tab in `pane`.
    fn close_file(&mut self, pane: PaneId, file: FileId);

    /// Open the file in `pane`, or in the current pane (creating one if the
    /// editor area is empty) when `pane` is `None`.
    fn open_file(&mut self, file: FileId, pane: Option<PaneId>, focus: bool) -> Result<PaneId>;

    /// Split `pane`, returning the new pane, or `None` if the split failed.
    fn split(&mut self, pane: PaneId, request: SplitRequest) -> Option<PaneId>;

    /// Move the caret of the file's selected editor. Returns `false` when the
    /// file has no editor.
    fn move_caret(&mut self, file: FileId, offset: usize) -> bool;
}
