//! Markdown to HTML rendering with link rewriting.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};

use lectern_config::join_base_url;
use lectern_mdx::{markdown_options, slugify, CodeBlock};

/// Languages the client highlighter ships without `additional_languages`.
const BUNDLED_LANGUAGES: &[&str] = &[
    "markup", "html", "xml", "jsx", "tsx", "javascript", "typescript", "css", "json", "yaml",
    "markdown", "bash", "python", "go", "rust", "cpp", "c", "kotlin", "swift", "graphql", "",
];

/// Source file -> route of every markdown document in the build.
pub type DocIndex = HashMap<PathBuf, String>;

/// Inputs that shape how a document renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// File the markdown came from
    pub source_path: &'a Path,
    /// Site root; `/docs/faq.md` style links start here
    pub root: &'a Path,
    pub base_url: &'a str,
    pub docs: &'a DocIndex,
    /// Languages registered on top of the bundled set
    pub additional_languages: &'a [String],
}

/// Rendered HTML plus what the link checker needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedMarkdown {
    pub html: String,

    /// Internal destinations as written (absolute ones relative to the base URL)
    pub links: Vec<String>,

    /// File links (`./faq.md`) that match no document
    pub broken_file_links: Vec<String>,
}

/// Render a markdown body.
///
/// File links are rewritten to the target document's route, absolute
/// internal links get the base URL, headings receive anchor ids and fenced
/// code becomes highlighter-ready markup.
pub fn render_markdown(content: &str, ctx: &RenderContext<'_>) -> RenderedMarkdown {
    let events: Vec<Event<'_>> = Parser::new_ext(content, markdown_options()).collect();

    let mut output: Vec<Event<'_>> = Vec::with_capacity(events.len());
    let mut links = Vec::new();
    let mut broken_file_links = Vec::new();
    let mut code: Option<(String, String)> = None; // (info, source)

    for (index, event) in events.iter().enumerate() {
        if code.is_some() {
            match event {
                Event::Text(text) => {
                    if let Some((_, source)) = code.as_mut() {
                        source.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((info, source)) = code.take() {
                        let block = CodeBlock::from_fence(&info, source, 0);
                        if !is_known_language(&block.language, ctx.additional_languages) {
                            tracing::debug!(
                                "No highlighter for '{}' in {}; add it to prism.additional_languages",
                                block.language,
                                ctx.source_path.display()
                            );
                        }
                        output.push(Event::Html(CowStr::from(render_code_block(&block))));
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((info, String::new()));
            }

            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = match id {
                    Some(id) => id.clone(),
                    None => CowStr::from(slugify(heading_text(&events[index + 1..]).trim())),
                };
                output.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(id),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest = rewrite_link(dest_url, ctx, &mut links, &mut broken_file_links);
                output.push(Event::Start(Tag::Link {
                    link_type: *link_type,
                    dest_url: CowStr::from(dest),
                    title: title.clone(),
                    id: id.clone(),
                }));
            }

            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest = if dest_url.starts_with('/') && !dest_url.starts_with("//") {
                    join_base_url(ctx.base_url, dest_url)
                } else {
                    dest_url.to_string()
                };
                output.push(Event::Start(Tag::Image {
                    link_type: *link_type,
                    dest_url: CowStr::from(dest),
                    title: title.clone(),
                    id: id.clone(),
                }));
            }

            other => output.push(other.clone()),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, output.into_iter());

    RenderedMarkdown {
        html: html_output,
        links,
        broken_file_links,
    }
}

/// Render a markdown fragment without the wrapping paragraph.
pub fn render_inline_markdown(source: &str) -> String {
    let mut html_output = String::new();
    html::push_html(&mut html_output, Parser::new_ext(source, markdown_options()));

    let trimmed = html_output.trim();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn rewrite_link(
    dest: &str,
    ctx: &RenderContext<'_>,
    links: &mut Vec<String>,
    broken_file_links: &mut Vec<String>,
) -> String {
    if dest.is_empty() || dest.starts_with('#') || is_external(dest) {
        return dest.to_string();
    }

    let (path, fragment) = match dest.find('#') {
        Some(pos) => (&dest[..pos], &dest[pos..]),
        None => (dest, ""),
    };

    if path.ends_with(".md") || path.ends_with(".mdx") {
        let target = if path.starts_with('/') {
            normalize_path(&ctx.root.join(path.trim_start_matches('/')))
        } else {
            let dir = ctx.source_path.parent().unwrap_or(Path::new(""));
            normalize_path(&dir.join(path))
        };

        return match ctx.docs.get(&target) {
            Some(route) => {
                links.push(route.clone());
                format!("{}{}", join_base_url(ctx.base_url, route), fragment)
            }
            None => {
                broken_file_links.push(dest.to_string());
                dest.to_string()
            }
        };
    }

    links.push(dest.to_string());

    if dest.starts_with('/') {
        join_base_url(ctx.base_url, dest)
    } else {
        dest.to_string()
    }
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("//") || url::Url::parse(dest).is_ok()
}

fn is_known_language(language: &str, additional: &[String]) -> bool {
    BUNDLED_LANGUAGES.contains(&language) || additional.iter().any(|l| l == language)
}

/// Text of the heading whose start event precedes `events`.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

fn render_code_block(block: &CodeBlock) -> String {
    let language_class = if block.language.is_empty() {
        "language-text".to_string()
    } else {
        format!("language-{}", block.language)
    };

    let mut html = String::from("<div class=\"code-block\">");

    if let Some(title) = &block.title {
        html.push_str(&format!(
            "<div class=\"code-block-title\">{}</div>",
            escape_html(title)
        ));
    }

    html.push_str(&format!(
        "<pre class=\"prism-code {}{}\"><code class=\"{}\">",
        language_class,
        if block.show_line_numbers {
            " line-numbers"
        } else {
            ""
        },
        language_class
    ));

    let source = block.source.strip_suffix('\n').unwrap_or(&block.source);
    for (index, line) in source.split('\n').enumerate() {
        let highlighted = block.highlight_lines.contains(&(index + 1));
        html.push_str(&format!(
            "<span class=\"token-line{}\">{}</span>\n",
            if highlighted { " highlighted" } else { "" },
            escape_html(line)
        ));
    }

    html.push_str("</code></pre></div>\n");
    html
}

/// Lexically resolve `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
