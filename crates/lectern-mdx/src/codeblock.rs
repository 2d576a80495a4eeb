//! Code block extraction and fence metadata.

/// A fenced code block from a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Language tag, lowercased (`csharp`, `bash`); empty when absent
    pub language: String,

    /// Source code content
    pub source: String,

    /// Line number where the block starts (1-indexed)
    pub line_number: usize,

    /// Caption from `title="Program.cs"`
    pub title: Option<String>,

    /// `showLineNumbers` was present on the fence
    pub show_line_numbers: bool,

    /// Highlighted lines from `{1,3-5}`
    pub highlight_lines: Vec<usize>,
}

impl CodeBlock {
    /// Create a code block from its fence info string.
    pub fn from_fence(info: &str, source: String, line_number: usize) -> Self {
        let line_count = source.lines().count();
        Self {
            language: language_from_info(info),
            source,
            line_number,
            title: extract_title(info),
            show_line_numbers: info
                .split_whitespace()
                .any(|word| word == "showLineNumbers"),
            highlight_lines: extract_highlight_lines(info, line_count),
        }
    }
}

/// Language tag of a fence info string.
pub fn language_from_info(info: &str) -> String {
    info.split_whitespace()
        .next()
        .filter(|word| !word.starts_with('{') && !word.contains('='))
        .map(|word| match word.to_lowercase().as_str() {
            "cs" | "c#" => "csharp".to_string(),
            "sh" | "shell" => "bash".to_string(),
            "js" => "javascript".to_string(),
            "ts" => "typescript".to_string(),
            "vb" => "vbnet".to_string(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

/// Extract the caption from a fence info string.
///
/// Supports formats like:
/// - `csharp title="Program.cs"`
/// - `csharp title=Program.cs`
pub fn extract_title(info: &str) -> Option<String> {
    if let Some(start) = info.find("title=\"") {
        let rest = &info[start + 7..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    if let Some(start) = info.find("title=") {
        let rest = &info[start + 6..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let title = rest[..end].trim_matches('"');
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    None
}

/// Parse `{1,3-5}` highlight ranges; malformed parts are skipped.
///
/// Lines past `line_count` are dropped, ranges included.
pub fn extract_highlight_lines(info: &str, line_count: usize) -> Vec<usize> {
    let Some(start) = info.find('{') else {
        return Vec::new();
    };
    let Some(len) = info[start..].find('}') else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for part in info[start + 1..start + len].split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((from, to)) => {
                if let (Ok(from), Ok(to)) = (from.trim().parse::<usize>(), to.trim().parse::<usize>()) {
                    lines.extend(from..=to.min(line_count));
                }
            }
            None => {
                if let Ok(line) = part.parse::<usize>() {
                    if line <= line_count {
                        lines.push(line);
                    }
                }
            }
        }
    }

    lines.sort_unstable();
    lines.dedup();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(language_from_info("csharp title=\"a.cs\""), "csharp");
        assert_eq!(language_from_info("cs"), "csharp");
        assert_eq!(language_from_info("C#"), "csharp");
        assert_eq!(language_from_info("sh"), "bash");
        assert_eq!(language_from_info(""), "");
        assert_eq!(language_from_info("{1,2}"), "");
    }

    #[test]
    fn extracts_title() {
        assert_eq!(
            extract_title("csharp title=\"Program.cs\""),
            Some("Program.cs".to_string())
        );
        assert_eq!(
            extract_title("csharp title=Program.cs showLineNumbers"),
            Some("Program.cs".to_string())
        );
        assert_eq!(extract_title("csharp"), None);
    }

    #[test]
    fn extracts_highlight_ranges() {
        assert_eq!(extract_highlight_lines("csharp {1,3-5}", 10), vec![1, 3, 4, 5]);
        assert_eq!(extract_highlight_lines("csharp {2, x, 2}", 10), vec![2]);
        assert!(extract_highlight_lines("csharp", 10).is_empty());
    }

    #[test]
    fn clamps_highlight_ranges_to_block_length() {
        assert_eq!(extract_highlight_lines("cs {1-50000000}", 3), vec![1, 2, 3]);
        assert_eq!(extract_highlight_lines("cs {2,7,40-60}", 5), vec![2]);
        assert!(extract_highlight_lines("cs {1-3}", 0).is_empty());
    }

    #[test]
    fn builds_block_from_fence() {
        let block = CodeBlock::from_fence(
            "csharp title=\"Doc.cs\" showLineNumbers {2}",
            "var doc = DocX.Create(\"a.docx\");\ndoc.Save();".to_string(),
            4,
        );

        assert_eq!(block.language, "csharp");
        assert_eq!(block.title.as_deref(), Some("Doc.cs"));
        assert!(block.show_line_numbers);
        assert_eq!(block.highlight_lines, vec![2]);
    }
}
