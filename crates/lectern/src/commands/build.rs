//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lectern_config::LoadedSite;
use lectern_static::{BuildConfig, StaticBuilder};

/// Run the build command.
pub async fn run(config_path: &Path, output: PathBuf, minify: bool) -> Result<()> {
    tracing::info!("Building static site...");

    let site = LoadedSite::load(config_path)
        .with_context(|| format!("Invalid site configuration in {}", config_path.display()))?;

    let config = BuildConfig {
        output_dir: output,
        minify,
        ..Default::default()
    };

    let result = StaticBuilder::new(site, config)
        .build()
        .await
        .context("Build failed")?;

    tracing::info!("{}", result.summary());

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
