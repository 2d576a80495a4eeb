//! Markdown document parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::CodeBlock;
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// Marker separating a blog post summary from the rest of the post.
pub const TRUNCATE_MARKER: &str = "<!-- truncate -->";

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,

    /// Link destinations in document order
    pub links: Vec<String>,

    /// Number of words outside code blocks
    pub word_count: usize,
}

impl ParsedDoc {
    /// Frontmatter title, falling back to the first level-one heading.
    pub fn title(&self) -> Option<String> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.clone())
            .or_else(|| {
                self.toc
                    .iter()
                    .find(|entry| entry.level == 1)
                    .map(|entry| entry.title.clone())
            })
    }

    /// Content before the truncate marker, if the document has one.
    pub fn summary(&self) -> Option<&str> {
        self.content
            .find(TRUNCATE_MARKER)
            .map(|pos| self.content[..pos].trim_end())
    }

    pub fn is_truncated(&self) -> bool {
        self.content.contains(TRUNCATE_MARKER)
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing markdown.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for every document.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse a markdown document.
///
/// Extracts frontmatter, code blocks, links and generates a table of contents.
pub fn parse_markdown(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();
    let mut links = Vec::new();
    let mut word_count = 0;

    let parser = Parser::new_ext(content, markdown_options());

    let mut current_code_block: Option<(String, usize, String)> = None; // (info, line, source)
    let mut current_heading: Option<(u8, Option<String>, String)> = None; // (level, id, text)
    let mut line_number = 1;

    let frontmatter_len = source.len() - content.len();
    let frontmatter_line_offset = source[..frontmatter_len].lines().count();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                current_code_block = Some((
                    info,
                    line_number + frontmatter_line_offset,
                    String::new(),
                ));
            }

            Event::Text(text) => {
                if let Some((_, _, ref mut source)) = current_code_block {
                    source.push_str(&text);
                } else {
                    word_count += text.split_whitespace().count();
                    if let Some((_, _, ref mut heading_text)) = current_heading {
                        heading_text.push_str(&text);
                    }
                }

                line_number += text.matches('\n').count();
            }

            Event::Code(code) => {
                word_count += 1;
                if let Some((_, _, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&code);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, start_line, source)) = current_code_block.take() {
                    code_blocks.push(CodeBlock::from_fence(&info, source, start_line));
                }
            }

            Event::Start(Tag::Heading { level, id, .. }) => {
                current_heading = Some((level as u8, id.map(|i| i.to_string()), String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, title)) = current_heading.take() {
                    let title = title.trim().to_string();
                    let id = id.unwrap_or_else(|| slugify(&title));
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                links.push(dest_url.to_string());
            }

            Event::SoftBreak | Event::HardBreak => {
                line_number += 1;
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
        toc,
        links,
        word_count,
    })
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_document() {
        let source = r#"---
title: DocX
description: Create Word documents
---

# DocX

Create a document, then see [Workbooks](/workbooks/intro) or [the FAQ](./faq.md).

```csharp title="Program.cs"
var doc = DocX.Create("test.docx");
```

## Saving {#save}

```bash
dotnet run
```
"#;

        let doc = parse_markdown(source).unwrap();

        let fm = doc.frontmatter.as_ref().unwrap();
        assert_eq!(fm.title.as_deref(), Some("DocX"));

        assert_eq!(doc.code_blocks.len(), 2);
        assert_eq!(doc.code_blocks[0].language, "csharp");
        assert_eq!(doc.code_blocks[0].title.as_deref(), Some("Program.cs"));
        assert!(doc.code_blocks[0].source.contains("DocX.Create"));
        assert_eq!(doc.code_blocks[1].language, "bash");

        assert_eq!(doc.toc.len(), 2);
        assert_eq!(doc.toc[0].id, "docx");
        assert_eq!(doc.toc[1].title, "Saving");
        assert_eq!(doc.toc[1].id, "save");

        assert_eq!(doc.links, vec!["/workbooks/intro", "./faq.md"]);
    }

    #[test]
    fn title_falls_back_to_first_heading() {
        let doc = parse_markdown("Intro text\n\n# Zip for .NET\n\n## Usage").unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.title().as_deref(), Some("Zip for .NET"));
    }

    #[test]
    fn detects_truncate_marker() {
        let doc = parse_markdown("Summary here.\n\n<!-- truncate -->\n\nThe rest.").unwrap();

        assert!(doc.is_truncated());
        assert_eq!(doc.summary(), Some("Summary here."));

        let untruncated = parse_markdown("No marker.").unwrap();
        assert!(!untruncated.is_truncated());
        assert_eq!(untruncated.summary(), None);
    }

    #[test]
    fn counts_words_outside_code() {
        let doc = parse_markdown("One two three.\n\n```\nnot counted here\n```\n").unwrap();
        assert_eq!(doc.word_count, 3);
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Zip (Advanced)"), "zip-advanced");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
