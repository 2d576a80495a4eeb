//! Configuration validation.

use std::collections::{BTreeMap, HashMap};

use crate::site::{normalize_route, SiteConfig, DEFAULT_SECTION_ID};
use crate::sidebar::Sidebars;
use crate::theme::NavbarTarget;

/// Errors that make a site configuration unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid sidebar file for section '{section}' ({path}): {message}")]
    Sidebar {
        section: String,
        path: String,
        message: String,
    },

    #[error("Default locale '{locale}' is not one of the configured locales [{locales}]")]
    UnknownDefaultLocale { locale: String, locales: String },

    #[error("Docs plugin id '{0}' is registered more than once")]
    DuplicatePluginId(String),

    #[error("Route base path '/{path}' is claimed by both '{first}' and '{second}'")]
    DuplicateRouteBasePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("Content directory of section '{section}' not found: {path}")]
    MissingContentDir { section: String, path: String },

    #[error("Sidebar file of section '{section}' not found: {path}")]
    MissingSidebarFile { section: String, path: String },

    #[error("Navbar item '{label}' references unknown docs plugin '{plugin}'")]
    UnknownDocsPlugin { label: String, plugin: String },

    #[error("Navbar item '{label}' references unknown sidebar '{sidebar_id}' of section '{section}'")]
    UnknownSidebar {
        label: String,
        sidebar_id: String,
        section: String,
    },

    #[error("Navbar item '{label}' has an invalid href '{href}': {message}")]
    InvalidHref {
        label: String,
        href: String,
        message: String,
    },

    #[error("Navbar item '{0}' has an empty link target")]
    EmptyLinkTarget(String),

    #[error("Invalid base_url '{0}': it must start and end with '/'")]
    InvalidBaseUrl(String),

    #[error("Invalid site url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Homepage columns must be between 1 and 12, got {0}")]
    InvalidColumns(usize),

    #[error("base_url '{base_url}' shadows the route base '/{path}' of '{section}'")]
    BaseUrlShadowsRoute {
        base_url: String,
        path: String,
        section: String,
    },
}

/// Validate a configuration against the sidebars loaded for its sections.
///
/// `sidebars` is keyed by section id.
pub fn validate(
    config: &SiteConfig,
    sidebars: &BTreeMap<String, Sidebars>,
) -> Result<(), ConfigError> {
    validate_urls(config)?;
    validate_locales(config)?;
    validate_sections(config)?;
    validate_navbar(config, sidebars)?;

    if let Some(columns) = config.homepage.columns {
        if columns == 0 || columns > 12 {
            return Err(ConfigError::InvalidColumns(columns));
        }
    }

    Ok(())
}

fn validate_urls(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.base_url.starts_with('/') || !config.base_url.ends_with('/') {
        return Err(ConfigError::InvalidBaseUrl(config.base_url.clone()));
    }

    url::Url::parse(&config.url).map_err(|e| ConfigError::InvalidUrl {
        url: config.url.clone(),
        message: e.to_string(),
    })?;

    Ok(())
}

fn validate_locales(config: &SiteConfig) -> Result<(), ConfigError> {
    let i18n = &config.i18n;
    if !i18n.locales.contains(&i18n.default_locale) {
        return Err(ConfigError::UnknownDefaultLocale {
            locale: i18n.default_locale.clone(),
            locales: i18n.locales.join(", "),
        });
    }
    Ok(())
}

fn validate_sections(config: &SiteConfig) -> Result<(), ConfigError> {
    let mut ids: Vec<&str> = Vec::new();
    let mut routes: HashMap<String, String> = HashMap::new();

    let sections = config.sections();
    for section in &sections {
        if ids.contains(&section.id.as_str()) {
            return Err(ConfigError::DuplicatePluginId(section.id.clone()));
        }
        ids.push(&section.id);

        claim_route(&mut routes, &section.route_base_path, &section.id)?;
    }

    if let Some(blog) = config.blog() {
        claim_route(&mut routes, &normalize_route(&blog.route_base_path), "blog")?;
    }

    // A route under the base path is indistinguishable from a prefixed link.
    let base = normalize_route(&config.base_url);
    if !base.is_empty() {
        let mut claimed: Vec<(&String, &String)> = routes.iter().collect();
        claimed.sort();
        for (path, section) in claimed {
            if *path == base || path.starts_with(&format!("{}/", base)) {
                return Err(ConfigError::BaseUrlShadowsRoute {
                    base_url: config.base_url.clone(),
                    path: path.clone(),
                    section: section.clone(),
                });
            }
        }
    }

    Ok(())
}

fn claim_route(
    routes: &mut HashMap<String, String>,
    route: &str,
    owner: &str,
) -> Result<(), ConfigError> {
    if let Some(first) = routes.get(route) {
        return Err(ConfigError::DuplicateRouteBasePath {
            path: route.to_string(),
            first: first.clone(),
            second: owner.to_string(),
        });
    }
    routes.insert(route.to_string(), owner.to_string());
    Ok(())
}

fn validate_navbar(
    config: &SiteConfig,
    sidebars: &BTreeMap<String, Sidebars>,
) -> Result<(), ConfigError> {
    for item in &config.theme.navbar.items {
        match &item.target {
            NavbarTarget::DocSidebar {
                sidebar_id,
                docs_plugin_id,
            } => {
                let section = docs_plugin_id.as_deref().unwrap_or(DEFAULT_SECTION_ID);
                let Some(section_sidebars) = sidebars.get(section) else {
                    return Err(ConfigError::UnknownDocsPlugin {
                        label: item.label.clone(),
                        plugin: section.to_string(),
                    });
                };
                if !section_sidebars.contains(sidebar_id) {
                    return Err(ConfigError::UnknownSidebar {
                        label: item.label.clone(),
                        sidebar_id: sidebar_id.clone(),
                        section: section.to_string(),
                    });
                }
            }
            NavbarTarget::External { href } => {
                url::Url::parse(href).map_err(|e| ConfigError::InvalidHref {
                    label: item.label.clone(),
                    href: href.clone(),
                    message: e.to_string(),
                })?;
            }
            NavbarTarget::Link { to } => {
                if to.trim().is_empty() {
                    return Err(ConfigError::EmptyLinkTarget(item.label.clone()));
                }
            }
        }
    }
    Ok(())
}
