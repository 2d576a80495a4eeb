//! Homepage feature grid.

use serde::Serialize;

use lectern_config::{join_base_url, FeatureDescriptor};

use crate::markdown::render_inline_markdown;
use crate::templates::TemplateEngine;

/// A laid-out feature grid, ready for the `features.html` template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGrid {
    pub columns: usize,

    /// Width class on the 12-column grid (`col--6`); empty when 12 does not divide evenly
    pub col_class: String,

    /// Inline flex basis giving every cell an equal share of the row
    pub basis: String,

    pub cells: Vec<FeatureCell>,
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCell {
    pub title: String,
    /// Target of both the icon and the heading
    pub href: String,
    pub icon_src: String,
    pub description_html: String,
}

impl FeatureGrid {
    /// Lay out descriptors in input order, `columns` cells per row.
    pub fn new(features: &[FeatureDescriptor], columns: usize, base_url: &str) -> Self {
        let columns = columns.max(1);

        let col_class = if 12 % columns == 0 {
            format!("col--{}", 12 / columns)
        } else {
            String::new()
        };

        let cells = features
            .iter()
            .map(|feature| FeatureCell {
                title: feature.title.clone(),
                href: site_href(&feature.link, base_url),
                icon_src: site_href(&feature.icon, base_url),
                description_html: render_inline_markdown(&feature.description),
            })
            .collect();

        Self {
            columns,
            col_class,
            basis: format!("calc(100% / {})", columns),
            cells,
        }
    }
}

/// Render a feature grid to HTML.
pub fn render_feature_grid(
    features: &[FeatureDescriptor],
    columns: usize,
    base_url: &str,
) -> Result<String, minijinja::Error> {
    TemplateEngine::new().render_features(&FeatureGrid::new(features, columns, base_url))
}

/// Prefix site-relative paths with the base URL; absolute URLs pass through.
fn site_href(path: &str, base_url: &str) -> String {
    if url::Url::parse(path).is_ok() || path.starts_with("//") {
        path.to_string()
    } else {
        join_base_url(base_url, path)
    }
}
