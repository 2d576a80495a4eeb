//! Discovering docs and standalone pages on disk.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use lectern_config::DocsSection;
use lectern_mdx::{parse_markdown, ParsedDoc};

use crate::builder::BuildError;
use crate::markdown::{normalize_path, DocIndex};
use crate::routes::join_route;

/// Section id given to standalone pages.
pub const PAGES_SECTION_ID: &str = "pages";

/// A markdown document that becomes one page.
#[derive(Debug, Clone)]
pub struct DocPage {
    /// Owning section (`pages` for standalone pages)
    pub section_id: String,

    /// Doc id, unique within the section
    pub id: String,

    pub source_path: PathBuf,

    /// Path relative to the section root
    pub relative_path: PathBuf,

    pub route: String,

    pub title: String,

    pub sidebar_label: String,

    pub position: Option<f64>,

    pub doc: ParsedDoc,
}

impl DocPage {
    /// Directory of the doc inside its section, `""` at the top level.
    pub fn dir(&self) -> String {
        self.relative_path
            .parent()
            .map(path_to_slashes)
            .unwrap_or_default()
    }

    /// File name without extension.
    pub fn stem(&self) -> &str {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index")
    }

    pub fn is_index(&self) -> bool {
        self.stem() == "index"
    }

    pub fn description(&self) -> Option<String> {
        self.doc
            .frontmatter
            .as_ref()
            .and_then(|f| f.description.clone())
    }
}

/// Discover every doc of a section.
pub fn discover_docs(section: &DocsSection, include_drafts: bool) -> Result<Vec<DocPage>, BuildError> {
    if !section.content_path.is_dir() {
        return Err(BuildError::ReadError(format!(
            "Docs directory not found: {}",
            section.content_path.display()
        )));
    }

    let docs = discover(
        &section.content_path,
        &section.id,
        &section.route_prefix(),
        include_drafts,
    )?;

    tracing::debug!("Section '{}': {} doc(s)", section.id, docs.len());
    Ok(docs)
}

/// Discover standalone pages: `about.md` -> `/about`.
pub fn discover_pages(pages_dir: &Path, include_drafts: bool) -> Result<Vec<DocPage>, BuildError> {
    if !pages_dir.is_dir() {
        return Ok(Vec::new());
    }
    discover(pages_dir, PAGES_SECTION_ID, "", include_drafts)
}

fn discover(
    root: &Path,
    section_id: &str,
    route_prefix: &str,
    include_drafts: bool,
) -> Result<Vec<DocPage>, BuildError> {
    let mut pages = Vec::new();

    for path in markdown_files(root) {
        let doc = read_document(&path)?;

        if !include_drafts && doc.frontmatter.as_ref().is_some_and(|f| f.draft) {
            tracing::debug!("Skipping draft {}", path.display());
            continue;
        }

        let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let id = doc_id(&relative_path, &doc);
        let route = doc_route(route_prefix, &relative_path, &id, &doc);

        let title = doc.title().unwrap_or_else(|| file_title(&relative_path));
        let fm = doc.frontmatter.as_ref();
        let sidebar_label = fm
            .and_then(|f| f.sidebar_label.clone())
            .unwrap_or_else(|| title.clone());
        let position = fm.and_then(|f| f.sidebar_position);

        pages.push(DocPage {
            section_id: section_id.to_string(),
            id,
            source_path: path,
            relative_path,
            route,
            title,
            sidebar_label,
            position,
            doc,
        });
    }

    Ok(pages)
}

/// Every `.md`/`.mdx` file under `root`, sorted, skipping `_`-prefixed entries.
pub fn markdown_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('_'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_markdown(p))
        .collect();

    files.sort();
    files
}

pub fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx")
    )
}

/// Read and parse a markdown file.
pub fn read_document(path: &Path) -> Result<ParsedDoc, BuildError> {
    let content = fs::read_to_string(path)
        .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

    parse_markdown(&content).map_err(|e| BuildError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Doc id: the relative path without extension, the file name replaced by
/// the frontmatter `id` when present.
fn doc_id(relative: &Path, doc: &ParsedDoc) -> String {
    let dir = relative.parent().map(path_to_slashes).unwrap_or_default();
    let name = doc
        .frontmatter
        .as_ref()
        .and_then(|f| f.id.clone())
        .unwrap_or_else(|| {
            relative
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("index")
                .to_string()
        });

    if dir.is_empty() {
        name
    } else {
        format!("{}/{}", dir, name)
    }
}

fn doc_route(prefix: &str, relative: &Path, id: &str, doc: &ParsedDoc) -> String {
    if let Some(slug) = doc.frontmatter.as_ref().and_then(|f| f.slug.as_deref()) {
        if slug.starts_with('/') {
            return join_route(prefix, slug);
        }
        let dir = relative.parent().map(path_to_slashes).unwrap_or_default();
        return join_route(prefix, &format!("{}/{}", dir, slug));
    }

    let path = if id == "index" {
        ""
    } else {
        id.strip_suffix("/index").unwrap_or(id)
    };
    join_route(prefix, path)
}

/// Build the source-file lookup used to rewrite `.md` links.
pub fn build_doc_index<'a>(pages: impl IntoIterator<Item = &'a DocPage>) -> DocIndex {
    pages
        .into_iter()
        .map(|page| (normalize_path(&page.source_path), page.route.clone()))
        .collect()
}

fn file_title(relative: &Path) -> String {
    relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

fn path_to_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn section(root: &Path, id: &str, route: &str) -> DocsSection {
        DocsSection {
            id: id.to_string(),
            content_path: root.to_path_buf(),
            route_base_path: route.to_string(),
            sidebar_path: None,
        }
    }

    #[test]
    fn derives_ids_and_routes() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::write(root.join("intro.md"), "# Introduction\n").unwrap();
        fs::write(root.join("guides/index.md"), "# Guides\n").unwrap();
        fs::write(
            root.join("guides/save.md"),
            "---\nid: saving\nsidebar_label: Save\nsidebar_position: 2\n---\n# Saving a workbook\n",
        )
        .unwrap();

        let docs = discover_docs(&section(root, "workbooks", "workbooks"), false).unwrap();
        let summary: Vec<(&str, &str)> = docs
            .iter()
            .map(|d| (d.id.as_str(), d.route.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("guides/index", "/workbooks/guides"),
                ("guides/saving", "/workbooks/guides/saving"),
                ("intro", "/workbooks/intro"),
            ]
        );
        assert_eq!(docs[1].sidebar_label, "Save");
        assert_eq!(docs[1].position, Some(2.0));
        assert_eq!(docs[2].title, "Introduction");
    }

    #[test]
    fn slug_overrides_route() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("api")).unwrap();
        fs::write(temp.path().join("api/a.md"), "---\nslug: /reference\n---\n").unwrap();
        fs::write(temp.path().join("api/b.md"), "---\nslug: members\n---\n").unwrap();

        let docs = discover_docs(&section(temp.path(), "default", "docs"), false).unwrap();

        assert_eq!(docs[0].route, "/docs/reference");
        assert_eq!(docs[1].route, "/docs/api/members");
        assert_eq!(docs[0].title, "a");
    }

    #[test]
    fn root_mounted_index_is_site_root() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.md"), "# Home\n").unwrap();

        let docs = discover_docs(&section(temp.path(), "default", ""), false).unwrap();

        assert_eq!(docs[0].route, "/");
    }

    #[test]
    fn skips_drafts_and_underscored_entries() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("_partials")).unwrap();
        fs::write(temp.path().join("_partials/note.md"), "note").unwrap();
        fs::write(temp.path().join("_hidden.md"), "hidden").unwrap();
        fs::write(temp.path().join("wip.md"), "---\ndraft: true\n---\n").unwrap();
        fs::write(temp.path().join("intro.md"), "# Intro\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "text").unwrap();

        let docs = discover_docs(&section(temp.path(), "default", "docs"), false).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "intro");

        let with_drafts = discover_docs(&section(temp.path(), "default", "docs"), true).unwrap();
        assert_eq!(with_drafts.len(), 2);
    }

    #[test]
    fn pages_mount_at_site_root() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("about.md"), "# About\n").unwrap();

        let pages = discover_pages(temp.path(), false).unwrap();

        assert_eq!(pages[0].route, "/about");
        assert_eq!(pages[0].section_id, PAGES_SECTION_ID);
        assert!(discover_pages(&temp.path().join("missing"), false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_section_dir_is_an_error() {
        let temp = tempdir().unwrap();
        let err = discover_docs(&section(&temp.path().join("zip"), "zip", "zip"), false).unwrap_err();
        assert!(err.to_string().contains("zip"));
    }
}
