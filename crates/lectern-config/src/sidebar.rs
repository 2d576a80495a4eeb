//! Sidebar definition files.
//!
//! A sidebar file maps sidebar ids to item lists:
//!
//! ```yaml
//! tutorialSidebar:
//!   - intro
//!   - type: category
//!     label: Guides
//!     items:
//!       - type: autogenerated
//!         dir: guides
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Sidebar id used when a section registers no sidebar file.
pub const AUTOGENERATED_SIDEBAR_ID: &str = "default";

/// A sidebar entry, either a bare doc id or a typed entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    Doc(String),
    Entry(SidebarEntry),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SidebarEntry {
    /// Every doc under `dir`, subdirectories as categories
    Autogenerated {
        #[serde(default = "default_dir")]
        dir: String,
    },

    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },

    Category {
        label: String,
        #[serde(default)]
        items: Vec<SidebarItem>,
        #[serde(default)]
        collapsed: Option<bool>,
    },

    Link {
        href: String,
        label: String,
    },
}

/// All sidebars of one docs section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Sidebars(BTreeMap<String, Vec<SidebarItem>>);

impl Sidebars {
    /// Parse a YAML sidebar file.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Read and parse a sidebar file.
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        let source = fs::read_to_string(path).map_err(|e| SidebarError::Read(e.to_string()))?;
        Self::from_yaml(&source).map_err(|e| SidebarError::InvalidYaml(e.to_string()))
    }

    /// A single sidebar listing the whole section.
    pub fn autogenerated() -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            AUTOGENERATED_SIDEBAR_ID.to_string(),
            vec![SidebarItem::Entry(SidebarEntry::Autogenerated {
                dir: default_dir(),
            })],
        );
        Self(map)
    }

    pub fn get(&self, id: &str) -> Option<&[SidebarItem]> {
        self.0.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarItem])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Errors that can occur when loading a sidebar file.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("Failed to read sidebar file: {0}")]
    Read(String),

    #[error("Invalid YAML in sidebar file: {0}")]
    InvalidYaml(String),
}

fn default_dir() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_mixed_items() {
        let sidebars = Sidebars::from_yaml(
            r#"
tutorialSidebar:
  - intro
  - type: category
    label: Guides
    collapsed: true
    items:
      - type: autogenerated
        dir: guides
  - type: link
    href: https://xceed.com
    label: Xceed
"#,
        )
        .unwrap();

        let items = sidebars.get("tutorialSidebar").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], SidebarItem::Doc("intro".to_string()));
        assert_eq!(
            items[1],
            SidebarItem::Entry(SidebarEntry::Category {
                label: "Guides".to_string(),
                items: vec![SidebarItem::Entry(SidebarEntry::Autogenerated {
                    dir: "guides".to_string()
                })],
                collapsed: Some(true),
            })
        );
    }

    #[test]
    fn autogenerated_sidebar_covers_root() {
        let sidebars = Sidebars::autogenerated();
        assert!(sidebars.contains(AUTOGENERATED_SIDEBAR_ID));
        assert_eq!(sidebars.ids().count(), 1);
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(Sidebars::from_yaml("tutorialSidebar: [unclosed").is_err());
    }
}
