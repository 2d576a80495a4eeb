//! The site configuration object (`lectern.toml`).

use std::path::PathBuf;

use serde::Deserialize;

use crate::homepage::HomepageConfig;
use crate::theme::ThemeConfig;

/// Section id of the docs section registered by the classic preset.
pub const DEFAULT_SECTION_ID: &str = "default";

/// Reporting policy for a class of build diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Abort the build
    Throw,
    /// Log a warning and continue
    Warn,
    /// Say nothing
    Ignore,
}

/// Site-wide build configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site title
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    /// Favicon path, relative to the static directory
    #[serde(default)]
    pub favicon: Option<String>,

    /// Production origin (e.g. `https://xceedsoftware.github.io`)
    pub url: String,

    /// Path under which the site is served; starts and ends with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub organization_name: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default = "default_on_broken_links")]
    pub on_broken_links: Policy,

    #[serde(default = "default_on_broken_markdown_links")]
    pub on_broken_markdown_links: Policy,

    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub presets: Vec<Preset>,

    /// Additional docs sections
    #[serde(default)]
    pub plugins: Vec<DocsPlugin>,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub homepage: HomepageConfig,

    /// Directory copied verbatim to the output root
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Directory of standalone markdown pages (`about.md` -> `/about`)
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,
}

/// Locale settings.
#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
        }
    }
}

/// A bundled docs + blog + theme configuration unit.
#[derive(Debug, Clone, Deserialize)]
pub struct Preset {
    /// Preset name (only `classic` is known)
    #[serde(default = "default_preset_name")]
    pub name: String,

    /// The default docs section; absent means the preset registers none
    #[serde(default)]
    pub docs: Option<DocsOptions>,

    #[serde(default)]
    pub blog: Option<BlogOptions>,

    /// Stylesheet appended to the generated theme CSS
    #[serde(default)]
    pub custom_css: Option<String>,
}

/// Options of the preset's default docs section.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsOptions {
    #[serde(default = "default_docs_path")]
    pub path: String,

    #[serde(default = "default_docs_path")]
    pub route_base_path: String,

    /// Sidebar definition file; absent means one autogenerated sidebar
    #[serde(default)]
    pub sidebar_path: Option<String>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            path: default_docs_path(),
            route_base_path: default_docs_path(),
            sidebar_path: None,
        }
    }
}

/// A named docs section registration.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsPlugin {
    pub id: String,

    pub path: String,

    #[serde(default = "default_docs_path")]
    pub route_base_path: String,

    #[serde(default)]
    pub sidebar_path: Option<String>,
}

/// Blog options of the classic preset.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogOptions {
    #[serde(default = "default_blog_path")]
    pub path: String,

    #[serde(default = "default_blog_path")]
    pub route_base_path: String,

    #[serde(default)]
    pub show_reading_time: bool,

    #[serde(default)]
    pub feed_types: Vec<FeedType>,

    /// Ship XSLT stylesheets so browsers render the feeds
    #[serde(default)]
    pub xslt: bool,

    #[serde(default = "default_warn")]
    pub on_inline_tags: Policy,

    #[serde(default = "default_warn")]
    pub on_inline_authors: Policy,

    #[serde(default = "default_warn")]
    pub on_untruncated_blog_posts: Policy,
}

impl Default for BlogOptions {
    fn default() -> Self {
        Self {
            path: default_blog_path(),
            route_base_path: default_blog_path(),
            show_reading_time: false,
            feed_types: Vec::new(),
            xslt: false,
            on_inline_tags: Policy::Warn,
            on_inline_authors: Policy::Warn,
            on_untruncated_blog_posts: Policy::Warn,
        }
    }
}

/// Syndication feed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Atom,
}

/// A docs section, whether registered by the preset or as a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSection {
    /// Section id (`default` for the preset section)
    pub id: String,

    /// Content root
    pub content_path: PathBuf,

    /// Route prefix without surrounding slashes; empty mounts at the site root
    pub route_base_path: String,

    /// Sidebar definition file
    pub sidebar_path: Option<PathBuf>,
}

impl DocsSection {
    /// URL prefix of the section, e.g. `/workbooks` (empty for the root).
    pub fn route_prefix(&self) -> String {
        if self.route_base_path.is_empty() {
            String::new()
        } else {
            format!("/{}", self.route_base_path)
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_SECTION_ID
    }
}

impl SiteConfig {
    /// All docs sections, preset first, in registration order.
    pub fn sections(&self) -> Vec<DocsSection> {
        let preset_sections = self
            .presets
            .iter()
            .filter_map(|p| p.docs.as_ref())
            .map(|docs| DocsSection {
                id: DEFAULT_SECTION_ID.to_string(),
                content_path: PathBuf::from(&docs.path),
                route_base_path: normalize_route(&docs.route_base_path),
                sidebar_path: docs.sidebar_path.as_ref().map(PathBuf::from),
            });

        let plugin_sections = self.plugins.iter().map(|plugin| DocsSection {
            id: plugin.id.clone(),
            content_path: PathBuf::from(&plugin.path),
            route_base_path: normalize_route(&plugin.route_base_path),
            sidebar_path: plugin.sidebar_path.as_ref().map(PathBuf::from),
        });

        preset_sections.chain(plugin_sections).collect()
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<DocsSection> {
        self.sections().into_iter().find(|s| s.id == id)
    }

    /// Blog options of the first preset that enables a blog.
    pub fn blog(&self) -> Option<&BlogOptions> {
        self.presets.iter().find_map(|p| p.blog.as_ref())
    }

    /// Custom stylesheets contributed by presets.
    pub fn custom_css(&self) -> Vec<&str> {
        self.presets
            .iter()
            .filter_map(|p| p.custom_css.as_deref())
            .collect()
    }

    /// Join an internal path onto the base URL: `/zip/intro` -> `/xceed-libs-doc/zip/intro`.
    pub fn url_for(&self, path: &str) -> String {
        join_base_url(&self.base_url, path)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            tagline: String::new(),
            favicon: None,
            url: "http://localhost".to_string(),
            base_url: default_base_url(),
            organization_name: None,
            project_name: None,
            on_broken_links: default_on_broken_links(),
            on_broken_markdown_links: default_on_broken_markdown_links(),
            i18n: I18nConfig::default(),
            presets: Vec::new(),
            plugins: Vec::new(),
            theme: ThemeConfig::default(),
            homepage: HomepageConfig::default(),
            static_dir: default_static_dir(),
            pages_dir: default_pages_dir(),
        }
    }
}

/// Join a site path onto `base_url`, leaving paths that already carry it alone.
///
/// Matches how link checking strips the base, so a link that checks out
/// renders to the same route.
pub fn join_base_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if !base.is_empty() && (path == base || path.starts_with(&format!("{}/", base))) {
        return path.to_string();
    }
    format!("{}{}", base_url, path.trim_start_matches('/'))
}

/// Strip surrounding slashes from a route base path.
pub fn normalize_route(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn default_base_url() -> String {
    "/".to_string()
}
fn default_on_broken_links() -> Policy {
    Policy::Throw
}
fn default_on_broken_markdown_links() -> Policy {
    Policy::Warn
}
fn default_warn() -> Policy {
    Policy::Warn
}
fn default_preset_name() -> String {
    "classic".to_string()
}
fn default_docs_path() -> String {
    "docs".to_string()
}
fn default_blog_path() -> String {
    "blog".to_string()
}
fn default_static_dir() -> String {
    "static".to_string()
}
fn default_pages_dir() -> String {
    "src/pages".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
title = "Xceed Libraries for .NET"
url = "https://xceedsoftware.github.io"
base_url = "/xceed-libs-doc/"

[[presets]]
name = "classic"
[presets.docs]
sidebar_path = "sidebars.yaml"
[presets.blog]
show_reading_time = true
feed_types = ["rss", "atom"]

[[plugins]]
id = "workbooks"
path = "workbooks"
route_base_path = "/workbooks/"
sidebar_path = "sidebarsworkbooks.yaml"
"#;

    #[test]
    fn parses_policies_with_defaults() {
        let config: SiteConfig = toml::from_str(CONFIG).unwrap();

        assert_eq!(config.on_broken_links, Policy::Throw);
        assert_eq!(config.on_broken_markdown_links, Policy::Warn);
        assert_eq!(config.i18n.default_locale, "en");
    }

    #[test]
    fn exposes_sections_uniformly() {
        let config: SiteConfig = toml::from_str(CONFIG).unwrap();
        let sections = config.sections();

        assert_eq!(
            sections,
            vec![
                DocsSection {
                    id: "default".to_string(),
                    content_path: PathBuf::from("docs"),
                    route_base_path: "docs".to_string(),
                    sidebar_path: Some(PathBuf::from("sidebars.yaml")),
                },
                DocsSection {
                    id: "workbooks".to_string(),
                    content_path: PathBuf::from("workbooks"),
                    route_base_path: "workbooks".to_string(),
                    sidebar_path: Some(PathBuf::from("sidebarsworkbooks.yaml")),
                },
            ]
        );
        assert_eq!(sections[1].route_prefix(), "/workbooks");
    }

    #[test]
    fn finds_blog_options() {
        let config: SiteConfig = toml::from_str(CONFIG).unwrap();
        let blog = config.blog().unwrap();

        assert!(blog.show_reading_time);
        assert_eq!(blog.feed_types, vec![FeedType::Rss, FeedType::Atom]);
        assert_eq!(blog.on_untruncated_blog_posts, Policy::Warn);
    }

    #[test]
    fn joins_urls_onto_base() {
        let config: SiteConfig = toml::from_str(CONFIG).unwrap();
        assert_eq!(config.url_for("/zip/intro"), "/xceed-libs-doc/zip/intro");
        assert_eq!(config.url_for("about"), "/xceed-libs-doc/about");
    }

    #[test]
    fn keeps_paths_that_already_carry_the_base() {
        let base = "/xceed-libs-doc/";
        assert_eq!(join_base_url(base, "/xceed-libs-doc/docs/intro"), "/xceed-libs-doc/docs/intro");
        assert_eq!(join_base_url(base, "/xceed-libs-doc"), "/xceed-libs-doc");
        // A sibling path sharing the prefix text is not the base
        assert_eq!(join_base_url(base, "/xceed-libs-docs/a"), "/xceed-libs-doc/xceed-libs-docs/a");
        assert_eq!(join_base_url("/", "/docs/intro"), "/docs/intro");
    }
}
