//! Frontmatter extraction and parsing.

use serde::{Deserialize, Serialize};

/// Parsed frontmatter of a doc, page or blog post.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title; the first heading is used when absent
    #[serde(default)]
    pub title: Option<String>,

    /// Page description for SEO and feeds
    #[serde(default)]
    pub description: Option<String>,

    /// Doc id override
    #[serde(default)]
    pub id: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Label in the sidebar
    #[serde(default)]
    pub sidebar_label: Option<String>,

    /// Order in autogenerated sidebars (lower = first)
    #[serde(default)]
    pub sidebar_position: Option<f64>,

    /// Drafts are skipped in production builds
    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub hide_table_of_contents: bool,

    /// Blog post date (`YYYY-MM-DD` or RFC 3339)
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub authors: OneOrMany<AuthorRef>,

    #[serde(default)]
    pub tags: OneOrMany<String>,
}

/// A frontmatter field accepting a scalar or a list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<&T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items.iter().collect(),
        }
    }
}

/// A blog author: a key into `authors.yml`, or an inline definition.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AuthorRef {
    Key(String),
    Inline(Author),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Extract frontmatter from markdown content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = if yaml_content.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_doc_frontmatter() {
        let source = r#"---
title: Getting started
sidebar_position: 2
sidebar_label: Start here
---

# Getting started with Words
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title.as_deref(), Some("Getting started"));
        assert_eq!(fm.sidebar_position, Some(2.0));
        assert_eq!(fm.sidebar_label.as_deref(), Some("Start here"));
        assert!(content.starts_with("# Getting started with Words"));
    }

    #[test]
    fn extracts_blog_frontmatter() {
        let source = r#"---
title: Release 3.0
authors: [xceed, {name: Jane Doe, url: "https://example.com"}]
tags: release
date: 2024-05-01
---
Body
"#;

        let (fm, _) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        let authors = fm.authors.to_vec();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0], &AuthorRef::Key("xceed".to_string()));
        assert!(matches!(authors[1], AuthorRef::Inline(a) if a.name == "Jane Doe"));
        assert_eq!(fm.tags.to_vec(), vec![&"release".to_string()]);
        assert_eq!(fm.date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn handles_empty_frontmatter() {
        let (fm, content) = extract_frontmatter("---\n---\n# Title").unwrap();

        assert_eq!(fm, Some(Frontmatter::default()));
        assert_eq!(content, "# Title");
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
