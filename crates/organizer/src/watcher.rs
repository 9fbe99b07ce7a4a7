//! Reacts to opened files and moves them into per-category panes.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use paneorg_core::{
    Category, EditorHost, FileId, FileOpenListener, PaneId, SplitDirection, SplitRequest,
};
use paneorg_logger as log;
use paneorg_scheduler::{DelayScheduler, MainContext};

use crate::pane_selection::select_best_pane;
use crate::policy::OrganizerPolicy;

/// Organization of a template stub, waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOrganizeRequest {
    pub file: FileId,
    pub category: Category,
    pub delay: Duration,
}

/// Listens for opened files and groups them into panes by category.
///
/// Cheap to clone; clones share the policy, scheduler and main context.
#[derive(Clone)]
pub struct FileOpenedWatcher {
    policy: Arc<OrganizerPolicy>,
    scheduler: Arc<dyn DelayScheduler>,
    main: Arc<dyn MainContext>,
}

impl FileOpenedWatcher {
    /// Create a watcher.
    pub fn new(
        policy: OrganizerPolicy,
        scheduler: Arc<dyn DelayScheduler>,
        main: Arc<dyn MainContext>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            scheduler,
            main,
        }
    }

    /// Policy in use.
    pub fn policy(&self) -> &OrganizerPolicy {
        &self.policy
    }

    /// Handle a "file opened" notification.
    ///
    /// Files of unrecognized type are ignored. Template stubs are organized
    /// after the policy delay, everything else on the next main-context turn.
    pub fn on_file_opened(&self, host: &dyn EditorHost, file: FileId) {
        let Some(path) = host.file_path(file) else {
            return;
        };
        let Some(category) = self.policy.categories.classify(&path) else {
            return;
        };
        let name = display_name(&path);

        log::info(format!("Organizer: File opened: {}", name));

        if self.is_template_stub(host, file) {
            let request = PendingOrganizeRequest {
                file,
                category,
                delay: self.policy.template_delay,
            };
            log::info(format!(
                "Organizer: Skipping {} - appears to be a new file from template. Will organize in {} ms.",
                name,
                request.delay.as_millis()
            ));
            self.schedule_deferred(request, name);
            return;
        }

        log::info(format!("Organizer: Organizing existing file: {}", name));
        let watcher = self.clone();
        self.main
            .invoke_later(Box::new(move |host: &mut dyn EditorHost| {
                watcher.process_file_opening(host, file, category);
            }));
    }

    /// Check whether the file looks like an unexpanded template.
    ///
    /// Unreadable or missing documents count as real content.
    pub fn is_template_stub(&self, host: &dyn EditorHost, file: FileId) -> bool {
        match host.document_text(file) {
            Ok(Some(text)) => self.policy.detector.matches(&text),
            Ok(None) => false,
            Err(e) => {
                let name = host
                    .file_path(file)
                    .map(|path| display_name(&path))
                    .unwrap_or_else(|| file.to_string());
                log::warn(format!(
                    "Organizer: Error checking file status for {}: {:#}",
                    name, e
                ));
                false
            }
        }
    }

    /// Move the file into the best pane for its category, creating a split
    /// when no pane fits. Runs on the main context.
    pub fn process_file_opening(&self, host: &mut dyn EditorHost, file: FileId, category: Category) {
        let name = host
            .file_path(file)
            .map(|path| display_name(&path))
            .unwrap_or_else(|| file.to_string());
        let all_panes = host.panes();
        let current_pane = pane_holding(&*host, &all_panes, file);

        let caret = host.selected_caret(file);
        let target = select_best_pane(
            &*host,
            &self.policy.categories,
            &all_panes,
            current_pane,
            category,
            file,
        );

        match target {
            Some(target) if Some(target) != current_pane => {
                log::info(format!(
                    "Organizer: Moving {} to existing {} pane {}",
                    name, category, target
                ));
                if let Some(current) = current_pane {
                    host.close_file(current, file);
                }
                // Reopen only after the close went through.
                self.main
                    .invoke_later(Box::new(move |host: &mut dyn EditorHost| {
                        match host.open_file(file, Some(target), true) {
                            Ok(_) => restore_caret(host, file, caret),
                            Err(e) => log::warn(format!(
                                "Organizer: Failed to open {} in {}: {:#}",
                                file, target, e
                            )),
                        }
                    }));
            }
            None => {
                log::info(format!("Organizer: Creating new split for {} files", category));
                if let Some(current) = current_pane {
                    host.close_file(current, file);
                }
                self.create_split_pane(host, file, caret);
            }
            Some(_) => {
                log::info(format!("Organizer: {} is already in correct pane", name));
            }
        }
    }

    /// Open the file in a new vertical split next to the current pane, or
    /// as a plain tab when the editor area is empty.
    pub fn create_split_pane(&self, host: &mut dyn EditorHost, file: FileId, caret: Option<usize>) {
        let Some(current) = host.current_pane() else {
            match host.open_file(file, None, true) {
                Ok(_) => restore_caret(host, file, caret),
                Err(e) => log::warn(format!("Organizer: Failed to open {}: {:#}", file, e)),
            }
            return;
        };

        let request = SplitRequest {
            direction: SplitDirection::Vertical,
            force: true,
            file,
            focus_new: true,
        };
        match host.split(current, request) {
            Some(new_pane) => {
                log::debug(format!("Organizer: Split {} into {}", current, new_pane));
                if caret.is_some() {
                    self.main
                        .invoke_later(Box::new(move |host: &mut dyn EditorHost| {
                            restore_caret(host, file, caret);
                        }));
                }
            }
            None => log::warn(format!("Organizer: Failed to split {} for {}", current, file)),
        }
    }

    fn schedule_deferred(&self, request: PendingOrganizeRequest, name: String) {
        let watcher = self.clone();
        self.scheduler.schedule(
            request.delay,
            Box::new(move || {
                log::info(format!("Organizer: Scheduled organization for {}", name));
                let main = Arc::clone(&watcher.main);
                main.invoke_later(Box::new(move |host: &mut dyn EditorHost| {
                    // The file may have been closed while we waited.
                    if !host.is_file_open(request.file) {
                        log::debug(format!(
                            "Organizer: {} was closed before organization, skipping",
                            name
                        ));
                        return;
                    }
                    watcher.process_file_opening(host, request.file, request.category);
                }));
            }),
        );
    }
}

impl FileOpenListener for FileOpenedWatcher {
    fn file_opened(&self, host: &mut dyn EditorHost, file: FileId) {
        self.on_file_opened(host, file);
    }
}

fn restore_caret(host: &mut dyn EditorHost, file: FileId, caret: Option<usize>) {
    if let Some(offset) = caret {
        if !host.move_caret(file, offset) {
            log::debug(format!("Organizer: No editor for {} to restore caret", file));
        }
    }
}

/// Pane the file sits in: the focused pane when it shows the file, else the
/// first pane that does. Falls back to the focused pane for unopened files.
fn pane_holding(host: &dyn EditorHost, all_panes: &[PaneId], file: FileId) -> Option<PaneId> {
    let focused = host.current_pane();
    if let Some(pane) = focused {
        if host.pane_files(pane).contains(&file) {
            return Some(pane);
        }
    }
    all_panes
        .iter()
        .copied()
        .find(|&pane| host.pane_files(pane).contains(&file))
        .or(focused)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
