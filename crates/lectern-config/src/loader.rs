//! Loading a site: read, resolve, validate, publish.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sidebar::Sidebars;
use crate::site::{DocsSection, SiteConfig};
use crate::validate::{validate, ConfigError};

/// A validated site, ready to be built.
///
/// Paths in `config` stay as written; [`LoadedSite::resolve`] anchors them
/// at the directory holding the configuration file.
#[derive(Debug, Clone)]
pub struct LoadedSite {
    /// Site root (directory of the configuration file)
    pub root: PathBuf,

    pub config: SiteConfig,

    /// Sidebars keyed by section id
    pub sidebars: BTreeMap<String, Sidebars>,
}

impl LoadedSite {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: SiteConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!("Loaded config from {}", path.display());

        Self::from_config(root, config)
    }

    /// Check the file layout, load sidebars and validate an in-memory configuration.
    pub fn from_config(root: PathBuf, config: SiteConfig) -> Result<Self, ConfigError> {
        let mut sidebars = BTreeMap::new();

        for section in config.sections() {
            let content_dir = root.join(&section.content_path);
            if !content_dir.is_dir() {
                return Err(ConfigError::MissingContentDir {
                    section: section.id,
                    path: content_dir.display().to_string(),
                });
            }

            let section_sidebars = match &section.sidebar_path {
                Some(sidebar_path) => {
                    let path = root.join(sidebar_path);
                    if !path.is_file() {
                        return Err(ConfigError::MissingSidebarFile {
                            section: section.id,
                            path: path.display().to_string(),
                        });
                    }
                    Sidebars::load(&path).map_err(|e| ConfigError::Sidebar {
                        section: section.id.clone(),
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?
                }
                None => Sidebars::autogenerated(),
            };

            tracing::debug!(
                "Section '{}' mounted at /{} with {} sidebar(s)",
                section.id,
                section.route_base_path,
                section_sidebars.ids().count()
            );

            // Duplicate ids are reported by validation, keep the first.
            sidebars.entry(section.id).or_insert(section_sidebars);
        }

        validate(&config, &sidebars)?;

        Ok(Self {
            root,
            config,
            sidebars,
        })
    }

    /// Anchor a configured path at the site root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Docs sections with content roots and sidebar files resolved.
    pub fn sections(&self) -> Vec<DocsSection> {
        self.config
            .sections()
            .into_iter()
            .map(|s| DocsSection {
                content_path: self.resolve(&s.content_path),
                sidebar_path: s.sidebar_path.map(|p| self.resolve(p)),
                ..s
            })
            .collect()
    }

    /// Files whose change requires a rebuild of the configuration itself.
    pub fn config_inputs(&self) -> Vec<PathBuf> {
        self.sections()
            .into_iter()
            .filter_map(|s| s.sidebar_path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
title = "Xceed"
url = "https://xceedsoftware.github.io"

[[presets]]
[presets.docs]
sidebar_path = "sidebars.yaml"

[[plugins]]
id = "zip"
path = "zip"
route_base_path = "zip"
sidebar_path = "sidebarzip.yaml"

[[theme.navbar.items]]
type = "doc_sidebar"
sidebar_id = "tutorialSidebar"
label = "Words for .NET"
"#;

    fn write_site(root: &Path) {
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("zip")).unwrap();
        fs::write(root.join("lectern.toml"), CONFIG).unwrap();
        fs::write(root.join("sidebars.yaml"), "tutorialSidebar: [intro]\n").unwrap();
        fs::write(root.join("sidebarzip.yaml"), "zipSidebar: [intro]\n").unwrap();
    }

    #[test]
    fn loads_valid_site() {
        let temp = tempdir().unwrap();
        write_site(temp.path());

        let site = LoadedSite::load(&temp.path().join("lectern.toml")).unwrap();

        assert_eq!(site.root, temp.path());
        assert!(site.sidebars["default"].contains("tutorialSidebar"));
        assert!(site.sidebars["zip"].contains("zipSidebar"));
        assert_eq!(site.sections()[1].content_path, temp.path().join("zip"));
    }

    #[test]
    fn missing_sidebar_file_names_section() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        fs::remove_file(temp.path().join("sidebarzip.yaml")).unwrap();

        let err = LoadedSite::load(&temp.path().join("lectern.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::MissingSidebarFile { ref section, .. } if section == "zip"));
    }

    #[test]
    fn missing_content_dir_names_section() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        fs::remove_dir(temp.path().join("zip")).unwrap();

        let err = LoadedSite::load(&temp.path().join("lectern.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::MissingContentDir { ref section, .. } if section == "zip"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("lectern.toml");
        fs::write(&path, "title = ").unwrap();

        let err = LoadedSite::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("lectern.toml"));
    }
}
