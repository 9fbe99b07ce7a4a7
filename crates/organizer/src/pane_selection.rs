//! Choosing the pane a file belongs in.

use paneorg_core::{lowercase_extension, Category, EditorHost, FileId, PaneId};

use crate::policy::CategoryMap;

/// Pick the destination pane for a file of `category`.
///
/// 1. The pane holding the most other files of `category` (first pane in
///    host order wins ties), if any such file exists.
/// 2. Otherwise the current pane, if its other files are all of `category`
///    (or there are none). Files without an extension are ignored here.
/// 3. Otherwise `None`: a new pane is needed.
pub fn select_best_pane(
    host: &dyn EditorHost,
    categories: &CategoryMap,
    all_panes: &[PaneId],
    current_pane: Option<PaneId>,
    category: Category,
    exclude: FileId,
) -> Option<PaneId> {
    let mut best_pane = None;
    let mut max_count = 0;

    for &pane in all_panes {
        let count = host
            .pane_files(pane)
            .into_iter()
            .filter(|&file| file != exclude)
            .filter(|&file| {
                host.file_path(file)
                    .and_then(|path| categories.classify(&path))
                    == Some(category)
            })
            .count();
        if count > max_count {
            max_count = count;
            best_pane = Some(pane);
        }
    }

    if max_count > 0 {
        return best_pane;
    }

    let current = current_pane?;
    let compatible = host
        .pane_files(current)
        .into_iter()
        .filter(|&file| file != exclude)
        .filter_map(|file| host.file_path(file))
        .filter_map(|path| lowercase_extension(&path))
        .all(|ext| categories.classify_extension(&ext) == Some(category));

    compatible.then_some(current)
}
