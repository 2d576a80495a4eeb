//! Theme configuration: navbar, footer, color mode and code highlighting.

use serde::{Deserialize, Serialize};

/// Theme options consumed by the page templates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    /// Social card image
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub navbar: NavbarConfig,

    #[serde(default)]
    pub footer: FooterConfig,

    #[serde(default)]
    pub color_mode: ColorModeConfig,

    #[serde(default)]
    pub prism: PrismConfig,

    #[serde(default)]
    pub docs: DocsThemeConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavbarConfig {
    #[serde(default)]
    pub title: Option<String>,

    /// `primary` or `dark`
    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub logo: Option<Logo>,

    #[serde(default)]
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logo {
    #[serde(default)]
    pub alt: String,
    pub src: String,
}

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

/// A navbar entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavbarItem {
    pub label: String,

    #[serde(default)]
    pub position: Position,

    #[serde(flatten)]
    pub target: NavbarTarget,
}

/// Where a navbar entry points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavbarTarget {
    /// First doc of a sidebar
    DocSidebar {
        sidebar_id: String,
        /// Section owning the sidebar; the default section when absent
        #[serde(default)]
        docs_plugin_id: Option<String>,
    },

    /// Absolute URL, opened in a new tab
    External { href: String },

    /// Internal path
    Link { to: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterConfig {
    #[serde(default = "default_footer_style")]
    pub style: String,

    /// Copyright line; `{year}` is replaced with the build year
    #[serde(default)]
    pub copyright: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            style: default_footer_style(),
            copyright: None,
        }
    }
}

impl FooterConfig {
    /// Copyright line for a build happening in `year`.
    pub fn copyright_for(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|c| c.replace("{year}", &year.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorModeConfig {
    #[serde(default)]
    pub default_mode: ColorMode,

    /// Hide the light/dark toggle
    #[serde(default)]
    pub disable_switch: bool,

    /// Follow the OS preference when the reader has not chosen
    #[serde(default)]
    pub respect_prefers_color_scheme: bool,
}

/// Client-side code highlighting.
#[derive(Debug, Clone, Deserialize)]
pub struct PrismConfig {
    #[serde(default = "default_prism_theme")]
    pub theme: String,

    #[serde(default = "default_prism_dark_theme")]
    pub dark_theme: String,

    #[serde(default)]
    pub additional_languages: Vec<String>,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: default_prism_theme(),
            dark_theme: default_prism_dark_theme(),
            additional_languages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsThemeConfig {
    #[serde(default)]
    pub sidebar: SidebarBehavior,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SidebarBehavior {
    /// Allow readers to collapse the whole sidebar
    #[serde(default)]
    pub hideable: bool,

    /// Opening a category closes its siblings
    #[serde(default)]
    pub auto_collapse_categories: bool,
}

fn default_footer_style() -> String {
    "dark".to_string()
}
fn default_prism_theme() -> String {
    "github".to_string()
}
fn default_prism_dark_theme() -> String {
    "dracula".to_string()
}
