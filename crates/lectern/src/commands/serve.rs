//! Preview server command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lectern_config::LoadedSite;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: PathBuf) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'lectern build' first.",
            dir.display()
        );
    }

    // Pages link under the base URL, so serve them there
    let base_url = if config_path.exists() {
        LoadedSite::load(config_path)
            .with_context(|| format!("Invalid site configuration in {}", config_path.display()))?
            .config
            .base_url
    } else {
        "/".to_string()
    };

    lectern_server::serve_dir(&dir, &base_url, "127.0.0.1", port, true).await?;

    Ok(())
}
