//! Homepage feature list.

use serde::{Deserialize, Serialize};

/// One homepage-promoted product or section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeatureDescriptor {
    pub title: String,

    /// Vector image path relative to the static directory (e.g. `img/word.svg`)
    pub icon: String,

    /// Inline markdown
    pub description: String,

    /// Internal path the icon and heading link to
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomepageConfig {
    /// Cells per row; chosen from the feature count when absent
    #[serde(default)]
    pub columns: Option<usize>,

    #[serde(default)]
    pub features: Vec<FeatureDescriptor>,
}

impl HomepageConfig {
    /// Columns per row the grid is rendered with.
    pub fn effective_columns(&self) -> usize {
        self.columns
            .unwrap_or_else(|| default_columns(self.features.len()))
    }
}

/// Rows of three when the count allows it, otherwise rows of two.
pub fn default_columns(count: usize) -> usize {
    if count % 3 == 0 || count % 2 != 0 {
        3
    } else {
        2
    }
}
