//! Configuration check command.

use std::path::Path;

use anyhow::{Context, Result};
use lectern_config::LoadedSite;

/// Run the check command.
pub fn run(config_path: &Path) -> Result<()> {
    let site = LoadedSite::load(config_path)
        .with_context(|| format!("Invalid site configuration in {}", config_path.display()))?;

    for section in site.sections() {
        let sidebars = site
            .sidebars
            .get(&section.id)
            .map_or(0, |s| s.ids().count());
        tracing::info!(
            "Section '{}' at /{} ({} sidebar(s))",
            section.id,
            section.route_base_path,
            sidebars
        );
    }
    if let Some(blog) = site.config.blog() {
        tracing::info!("Blog at /{}", blog.route_base_path);
    }

    tracing::info!("{} is valid", config_path.display());

    Ok(())
}
