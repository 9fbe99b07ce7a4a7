//! Groups C++ implementation files and headers into their own editor panes.
//!
//! This crate provides:
//! - `OrganizerPolicy` - extension categories, template markers and delay
//! - `select_best_pane` - destination pane choice for an opened file
//! - `FileOpenedWatcher` - the "file opened" listener that moves tabs
//!
//! # Flow
//!
//! ```text
//! FileOpened ─→ category? ─no─→ ignore
//!                  │
//!                 yes ─→ template stub? ─yes─→ DelayScheduler ─┐
//!                              │                               │
//!                              no ────→ MainContext ←──────────┘
//!                                           │
//!                                  process_file_opening
//! ```

pub mod pane_selection;
pub mod policy;
pub mod watcher;

pub use pane_selection::select_best_pane;
pub use policy::{CategoryMap, OrganizerPolicy, TemplateDetector};
pub use watcher::{FileOpenedWatcher, PendingOrganizeRequest};
