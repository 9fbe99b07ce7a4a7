//! Organizer policy: extension categories, template markers, delay.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use paneorg_config::OrganizerSettings;
use paneorg_core::{lowercase_extension, Category};

/// Maps lowercased extensions to categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    extensions: HashMap<String, Category>,
}

impl CategoryMap {
    /// Build from extension lists. Extensions are lowercased; a later
    /// header entry wins over an implementation entry with the same name.
    pub fn new<I, H>(implementation: I, header: H) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let mut extensions = HashMap::new();
        for ext in implementation {
            extensions.insert(ext.as_ref().to_lowercase(), Category::Implementation);
        }
        for ext in header {
            extensions.insert(ext.as_ref().to_lowercase(), Category::Header);
        }
        Self { extensions }
    }

    /// Category of a lowercased extension.
    pub fn classify_extension(&self, extension: &str) -> Option<Category> {
        self.extensions.get(extension).copied()
    }

    /// Category of a path, `None` when its extension is not recognized.
    pub fn classify(&self, path: &Path) -> Option<Category> {
        lowercase_extension(path).and_then(|ext| self.classify_extension(&ext))
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new(["cpp"], ["h"])
    }
}

/// Detects files whose template placeholders are not yet substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDetector {
    markers: Vec<String>,
}

impl TemplateDetector {
    /// Create detector with an ordered marker list. Empty markers are dropped.
    pub fn new<M>(markers: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|marker: &String| !marker.is_empty())
                .collect(),
        }
    }

    /// Marker substrings in check order.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Empty text or text containing any marker is a template stub.
    pub fn matches(&self, text: &str) -> bool {
        text.is_empty() || self.markers.iter().any(|marker| text.contains(marker.as_str()))
    }
}

impl Default for TemplateDetector {
    fn default() -> Self {
        Self::new(paneorg_config::defaults::TEMPLATE_MARKERS.iter().copied())
    }
}

/// Everything the organizer decides with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerPolicy {
    pub categories: CategoryMap,
    pub detector: TemplateDetector,
    /// Delay before organizing a template stub
    pub template_delay: Duration,
}

impl OrganizerPolicy {
    /// Build policy from configuration.
    pub fn from_settings(settings: &OrganizerSettings) -> Self {
        Self {
            categories: CategoryMap::new(
                &settings.implementation_extensions,
                &settings.header_extensions,
            ),
            detector: TemplateDetector::new(settings.template_markers.iter().cloned()),
            template_delay: Duration::from_millis(settings.template_delay_ms),
        }
    }
}

impl Default for OrganizerPolicy {
    fn default() -> Self {
        Self::from_settings(&OrganizerSettings::default())
    }
}
