//! Notifications emitted by editor hosts.

use crate::host::{EditorHost, FileId};

/// Event published by an editor host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A file tab was opened (one event per open)
    FileOpened(FileId),
}

/// Subscriber to "file opened" notifications.
pub trait FileOpenListener {
    /// Called on the main execution context after `file` was opened.
    fn file_opened(&self, host: &mut dyn EditorHost, file: FileId);
}

/// Deliver an event to every listener, in subscription order.
pub fn dispatch(
    event: &HostEvent,
    host: &mut dyn EditorHost,
    listeners: &[Box<dyn FileOpenListener>],
) {
    match event {
        HostEvent::FileOpened(file) => {
            for listener in listeners {
                listener.file_opened(host, *file);
            }
        }
    }
}
