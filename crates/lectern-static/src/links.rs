//! Broken link detection.

use std::collections::BTreeSet;

use lectern_config::Policy;

use crate::builder::BuildError;
use crate::routes::{resolve_link, LinkTarget, RouteTable};

/// A link emitted while rendering, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Where the link appears (page route, or `navbar`)
    pub source: String,
    /// Route relative links are resolved against
    pub from_route: String,
    /// Destination as written
    pub href: String,
}

impl LinkRecord {
    pub fn new(source: impl Into<String>, from_route: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            from_route: from_route.into(),
            href: href.into(),
        }
    }
}

/// A link whose destination is not a known route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrokenLink {
    /// Page or component containing the link
    pub source: String,
    /// Destination as written
    pub link: String,
}

impl std::fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (linked from {})", self.link, self.source)
    }
}

/// Which policy governs a set of broken links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Rendered internal links (`on_broken_links`)
    Page,
    /// Markdown links to files (`on_broken_markdown_links`)
    Markdown,
}

/// Resolve every recorded link against the route table.
///
/// Each distinct (source, link) pair is reported once.
pub fn find_broken_links(
    records: &[LinkRecord],
    routes: &RouteTable,
    base_url: &str,
) -> Vec<BrokenLink> {
    let mut broken = BTreeSet::new();

    for record in records {
        if let LinkTarget::Internal(route) = resolve_link(&record.href, &record.from_route, base_url) {
            if !routes.contains(&route) {
                broken.insert(BrokenLink {
                    source: record.source.clone(),
                    link: record.href.clone(),
                });
            }
        }
    }

    broken.into_iter().collect()
}

/// Apply a reporting policy to broken links.
///
/// `throw` fails with every broken link listed, `warn` logs one diagnostic
/// per link and hands them back, `ignore` drops them.
pub fn apply_policy(
    policy: Policy,
    kind: LinkKind,
    broken: Vec<BrokenLink>,
) -> Result<Vec<BrokenLink>, BuildError> {
    if broken.is_empty() {
        return Ok(broken);
    }

    match policy {
        Policy::Throw => Err(match kind {
            LinkKind::Page => BuildError::BrokenLinks(broken),
            LinkKind::Markdown => BuildError::BrokenMarkdownLinks(broken),
        }),
        Policy::Warn => {
            for link in &broken {
                match kind {
                    LinkKind::Page => tracing::warn!("Broken link: {}", link),
                    LinkKind::Markdown => tracing::warn!("Broken markdown link: {}", link),
                }
            }
            Ok(broken)
        }
        Policy::Ignore => Ok(Vec::new()),
    }
}

/// Render a list of broken links for an error message.
pub fn describe_broken_links(links: &[BrokenLink]) -> String {
    let mut out = format!(
        "{} broken link{}:",
        links.len(),
        if links.len() == 1 { "" } else { "s" }
    );
    for link in links {
        out.push_str("\n  - ");
        out.push_str(&link.to_string());
    }
    out
}
