//! Pane layout management for paneorg.
//!
//! This crate provides an in-memory editor host:
//! - `PaneGroup` - one editor split holding a row of file tabs
//! - `LayoutManager` - ordered panes plus their documents, implementing
//!   `EditorHost`

pub mod layout_manager;
pub mod pane_group;

pub use layout_manager::{DocumentText, LayoutManager};
pub use pane_group::{FileTab, PaneGroup};
