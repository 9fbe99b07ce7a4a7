//! Core types and traits for paneorg.
//!
//! This crate provides the abstractions shared by the organizer and the
//! editor hosts it runs against, without coupling either side to the other.

pub mod category;
pub mod event;
pub mod host;

pub use category::{lowercase_extension, Category};
pub use event::{dispatch, FileOpenListener, HostEvent};
pub use host::{EditorHost, FileId, PaneId, SplitDirection, SplitRequest};
