//! File categories used to group editor tabs into panes.

use std::fmt;
use std::path::Path;

/// Grouping key derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Source files (`.cpp`)
    Implementation,
    /// Header files (`.h`)
    Header,
}

impl Category {
    /// Short lowercase name for log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Implementation => "implementation",
            Category::Header => "header",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of `path`, without the dot.
///
/// Returns `None` for paths without an extension (`Makefile`, `.gitignore`).
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(
            lowercase_extension(Path::new("/src/Widget.CPP")).as_deref(),
            Some("cpp")
        );
        assert_eq!(
            lowercase_extension(Path::new("include/widget.h")).as_deref(),
            Some("h")
        );
        assert_eq!(lowercase_extension(Path::new("Makefile")), None);
        assert_eq!(lowercase_extension(Path::new(".gitignore")), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Implementation.to_string(), "implementation");
        assert_eq!(Category::Header.to_string(), "header");
    }
}
