//! Site configuration for lectern documentation sites.
//!
//! This crate owns the declarative side of a site: the `lectern.toml` model,
//! the per-section sidebar definition files, the homepage feature list, and
//! the validate-then-publish loader that turns them into a [`LoadedSite`].

pub mod homepage;
pub mod loader;
pub mod sidebar;
pub mod site;
pub mod theme;
pub mod validate;

pub use homepage::{default_columns, FeatureDescriptor, HomepageConfig};
pub use loader::LoadedSite;
pub use sidebar::{SidebarEntry, SidebarError, SidebarItem, Sidebars, AUTOGENERATED_SIDEBAR_ID};
pub use site::{
    join_base_url, normalize_route, BlogOptions, DocsOptions, DocsPlugin, DocsSection, FeedType, I18nConfig,
    Policy, Preset, SiteConfig, DEFAULT_SECTION_ID,
};
pub use theme::{
    ColorMode, ColorModeConfig, DocsThemeConfig, FooterConfig, Logo, NavbarConfig, NavbarItem,
    NavbarTarget, Position, PrismConfig, SidebarBehavior, ThemeConfig,
};
pub use validate::{validate, ConfigError};
