//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Starter files, relative to the site root.
const FILES: &[(&str, &str)] = &[
    ("docs/intro.md", DEFAULT_INTRO),
    ("docs/guides/installation.md", DEFAULT_INSTALLATION),
    ("sidebars.yaml", DEFAULT_SIDEBARS),
    ("static/img/docs.svg", DEFAULT_ICON),
];

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing lectern site...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;
    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    for (relative, content) in FILES {
        let path = root.join(relative);
        if path.exists() && !yes {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'lectern dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Lectern configuration

title = "My Documentation"
tagline = "Guides and reference for my products"
url = "https://example.com"
base_url = "/"
on_broken_links = "throw"
on_broken_markdown_links = "warn"

[i18n]
default_locale = "en"
locales = ["en"]

[[presets]]
name = "classic"

[presets.docs]
path = "docs"
route_base_path = "docs"
sidebar_path = "sidebars.yaml"

# Additional products get their own docs section:
#
# [[plugins]]
# id = "reference"
# path = "reference"
# route_base_path = "reference"
# sidebar_path = "sidebars-reference.yaml"

[theme.navbar]
title = "My Documentation"

[[theme.navbar.items]]
label = "Docs"
type = "doc_sidebar"
sidebar_id = "docsSidebar"

[theme.footer]
style = "dark"
copyright = "Copyright © {year} My Organization"

[theme.color_mode]
default_mode = "dark"

[[homepage.features]]
title = "Documentation"
icon = "img/docs.svg"
description = "Start with the **introduction**."
link = "/docs/intro"
"#;

const DEFAULT_SIDEBARS: &str = r#"docsSidebar:
  - intro
  - type: category
    label: Guides
    items:
      - type: autogenerated
        dir: guides
"#;

const DEFAULT_INTRO: &str = r#"---
title: Introduction
sidebar_position: 1
---

# Introduction

Welcome to your documentation site, built with **lectern**.

Read the [installation guide](guides/installation.md) next.
"#;

const DEFAULT_INSTALLATION: &str = r#"---
title: Installation
---

# Installation

Start the development server:

```bash
lectern dev
```

Build the site for deployment:

```bash
lectern build
```
"#;

const DEFAULT_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="12" y="8" width="40" height="48" rx="4" fill="none" stroke="#2e8555" stroke-width="4"/><path d="M20 22h24M20 32h24M20 42h16" stroke="#2e8555" stroke-width="4"/></svg>
"##;
