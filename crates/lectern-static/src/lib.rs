//! Static site generation for lectern.
//!
//! Turns a validated [`lectern_config::LoadedSite`] into HTML pages, feeds
//! and assets, checking every internal link against the route table.

pub mod assets;
pub mod blog;
pub mod builder;
pub mod content;
pub mod features;
pub mod links;
pub mod markdown;
pub mod routes;
pub mod sidebar;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use features::{render_feature_grid, FeatureGrid};
pub use links::{BrokenLink, LinkKind};
pub use routes::RouteTable;
