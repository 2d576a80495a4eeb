//! Markdown front end for lectern.
//!
//! Parses markdown files, extracts YAML frontmatter, headings, links and
//! fenced code blocks.

pub mod codeblock;
pub mod frontmatter;
pub mod parser;

pub use codeblock::CodeBlock;
pub use frontmatter::{Author, AuthorRef, Frontmatter, FrontmatterError, OneOrMany};
pub use parser::{
    markdown_options, parse_markdown, slugify, ParseError, ParsedDoc, TocEntry, TRUNCATE_MARKER,
};
