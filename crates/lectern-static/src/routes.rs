//! Route table and internal link resolution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// Every route the build produces, with the source that claimed it.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route; a second claimant is a build error.
    pub fn insert(&mut self, route: &str, source: impl Into<String>) -> Result<(), BuildError> {
        let route = normalize_route(route);
        let source = source.into();

        if let Some(first) = self.routes.get(&route) {
            return Err(BuildError::RouteConflict {
                route,
                first: first.clone(),
                second: source,
            });
        }

        self.routes.insert(route, source);
        Ok(())
    }

    pub fn contains(&self, route: &str) -> bool {
        self.routes.contains_key(&normalize_route(route))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

/// Strip query, fragment and trailing slash: `/zip/intro/#top` -> `/zip/intro`.
pub fn normalize_route(route: &str) -> String {
    let end = route.find(|c: char| c == '?' || c == '#').unwrap_or(route.len());
    let path = route[..end].trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Join route segments: `("/workbooks", "guide/intro")` -> `/workbooks/guide/intro`.
pub fn join_route(prefix: &str, rest: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rest = rest.trim_matches('/');
    if rest.is_empty() {
        normalize_route(prefix)
    } else {
        normalize_route(&format!("{}/{}", prefix, rest))
    }
}

/// Output file of a route: `/zip/intro` -> `<out>/zip/intro/index.html`.
pub fn output_path(output_dir: &Path, route: &str) -> PathBuf {
    let route = normalize_route(route);
    let relative = route.trim_start_matches('/');
    if relative.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(relative).join("index.html")
    }
}

/// What a link destination points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute URL or non-http scheme
    External,
    /// Same-page anchor
    Anchor,
    /// Route on this site (query and fragment removed)
    Internal(String),
}

/// Classify a link found on the page at `from_route`.
///
/// Absolute paths are relative to the site's base URL; relative paths are
/// resolved against the page route.
pub fn resolve_link(href: &str, from_route: &str, base_url: &str) -> LinkTarget {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return LinkTarget::Anchor;
    }

    if url::Url::parse(href).is_ok() || href.starts_with("//") {
        return LinkTarget::External;
    }

    if href.starts_with('/') {
        let base = base_url.trim_end_matches('/');
        let stripped = if !base.is_empty() && (href == base || href.starts_with(&format!("{}/", base))) {
            &href[base.len()..]
        } else {
            href
        };
        return LinkTarget::Internal(normalize_route(stripped));
    }

    // Relative link: resolve against the page URL.
    let Ok(page) = url::Url::parse("http://site.invalid").and_then(|u| u.join(from_route)) else {
        return LinkTarget::Internal(normalize_route(href));
    };
    match page.join(href) {
        Ok(joined) => LinkTarget::Internal(normalize_route(joined.path())),
        Err(_) => LinkTarget::Internal(normalize_route(href)),
    }
}

/// Register every file under the static directory as a route.
pub fn register_static_files(
    table: &mut RouteTable,
    static_dir: &Path,
) -> Result<usize, BuildError> {
    if !static_dir.is_dir() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in walkdir::WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry
            .path()
            .strip_prefix(static_dir)
            .unwrap_or(entry.path());
        let route = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
        table.insert(&route, format!("static/{}", relative.display()))?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_routes() {
        assert_eq!(normalize_route("/zip/intro/"), "/zip/intro");
        assert_eq!(normalize_route("/zip/intro#usage"), "/zip/intro");
        assert_eq!(normalize_route("/zip/intro?x=1"), "/zip/intro");
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route("about"), "/about");
    }

    #[test]
    fn joins_routes() {
        assert_eq!(join_route("/workbooks", "intro"), "/workbooks/intro");
        assert_eq!(join_route("/workbooks", ""), "/workbooks");
        assert_eq!(join_route("", "intro"), "/intro");
        assert_eq!(join_route("", ""), "/");
    }

    #[test]
    fn detects_route_conflicts() {
        let mut table = RouteTable::new();
        table.insert("/zip/intro", "zip/intro.md").unwrap();

        let err = table.insert("/zip/intro/", "zip/intro/index.md").unwrap_err();

        match err {
            BuildError::RouteConflict {
                route,
                first,
                second,
            } => {
                assert_eq!(route, "/zip/intro");
                assert_eq!(first, "zip/intro.md");
                assert_eq!(second, "zip/intro/index.md");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn maps_routes_to_output_files() {
        let out = Path::new("build");
        assert_eq!(output_path(out, "/"), Path::new("build/index.html"));
        assert_eq!(
            output_path(out, "/zip/intro"),
            Path::new("build/zip/intro/index.html")
        );
    }

    #[test]
    fn resolves_links() {
        let base = "/xceed-libs-doc/";

        assert_eq!(
            resolve_link("https://github.com/xceedsoftware", "/", base),
            LinkTarget::External
        );
        assert_eq!(resolve_link("mailto:a@b.c", "/", base), LinkTarget::External);
        assert_eq!(resolve_link("#usage", "/", base), LinkTarget::Anchor);
        assert_eq!(
            resolve_link("/workbooks/intro", "/", base),
            LinkTarget::Internal("/workbooks/intro".to_string())
        );
        assert_eq!(
            resolve_link("/xceed-libs-doc/zip/intro#top", "/", base),
            LinkTarget::Internal("/zip/intro".to_string())
        );
        assert_eq!(
            resolve_link("../zip/intro", "/docs/guide/save", base),
            LinkTarget::Internal("/docs/zip/intro".to_string())
        );
        assert_eq!(
            resolve_link("save", "/docs/guide/intro", base),
            LinkTarget::Internal("/docs/guide/save".to_string())
        );
    }

    #[test]
    fn registers_static_files() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("img")).unwrap();
        std::fs::write(temp.path().join("img/word.svg"), "<svg/>").unwrap();

        let mut table = RouteTable::new();
        let count = register_static_files(&mut table, temp.path()).unwrap();

        assert_eq!(count, 1);
        assert!(table.contains("/img/word.svg"));
    }
}
