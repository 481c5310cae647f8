// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown documents.
//
// We scan each line with a single regex for the inline link form:
//
//     [display text](target)
//
// The display text may not contain `]` and the target may not contain `)`.
// Every match on a line is captured, left to right. Targets that start with
// `#` point inside the same document and are skipped entirely.
//
// Each extracted link is classified (local vs remote) on the spot, using
// LinkKind::of in link.rs.
//
// Rust concepts:
// - LazyLock: compile the regex once, the first time it is used
// - Iterators: enumerate() for line numbers, captures_iter() for matches
// =============================================================================

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::link::{LinkKind, LinkRecord};
use crate::error::ExtractionError;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // A literal pattern; failing to compile it is a programming error
    Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("link pattern is valid")
});

// Reads a markdown document and returns every link in it
//
// Parameters:
//   path: the document to read
//
// Returns: the links in line order, or an ExtractionError naming the file
pub fn extract_links(path: &Path) -> Result<Vec<LinkRecord>, ExtractionError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractionError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(extract_from_str(path, &content))
}

// Extracts links from markdown text that has already been read
//
// `source_file` is only recorded on each LinkRecord; nothing is read from it.
//
// Example input:
//   "See [docs](./docs.md) and [home](https://example.com)"
//
// Example output:
//   two records on line 1, the first Local, the second Remote
pub fn extract_from_str(source_file: &Path, markdown: &str) -> Vec<LinkRecord> {
    let mut links = Vec::new();

    for (index, line) in split_lines(markdown).enumerate() {
        for caps in LINK_PATTERN.captures_iter(line) {
            let target = &caps[2];

            // Anchor-only links never become records
            if target.starts_with('#') {
                continue;
            }

            links.push(LinkRecord {
                source_file: source_file.to_path_buf(),
                line: index + 1,
                text: caps[1].to_string(),
                target: target.to_string(),
                kind: LinkKind::of(target),
            });
        }
    }

    links
}

// Splits on "\r\n", "\n" and a lone "\r", so old Mac-style files get the
// same line numbers as any other. Like str::lines(), a trailing line break
// does not produce an empty last line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a regex instead of a full markdown parser?
//    - We report the exact line of every link, and a line-by-line scan gives
//      that for free
//    - Links inside code blocks are reported too; that is accepted behaviour
//
// 2. What does caps[1] / caps[2] mean?
//    - Capture group 1 is the display text, group 2 is the target
//    - Indexing a Captures panics only if the group does not exist, and both
//      groups are mandatory in the pattern
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn extract(markdown: &str) -> Vec<LinkRecord> {
        extract_from_str(Path::new("doc.md"), markdown)
    }

    #[test]
    fn test_extract_simple_link() {
        let links = extract("Check out [Rust](https://www.rust-lang.org)!");
        assert_eq!(
            links,
            vec![LinkRecord {
                source_file: PathBuf::from("doc.md"),
                line: 1,
                text: "Rust".to_string(),
                target: "https://www.rust-lang.org".to_string(),
                kind: LinkKind::Remote,
            }]
        );
    }

    #[test]
    fn test_multiple_links_per_line_in_order() {
        let links = extract("See [docs](./missing.md) and [home](https://example.invalid)");
        let targets: Vec<_> = links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["./missing.md", "https://example.invalid"]);
        assert_eq!(links[0].kind, LinkKind::Local);
        assert_eq!(links[1].kind, LinkKind::Remote);
    }

    #[test]
    fn test_line_numbers_are_one_indexed() {
        let markdown = "# Title\n\n- [a](a.md)\n- [b](b.md)\n";
        let lines: Vec<_> = extract(markdown).iter().map(|l| l.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_every_line_ending_style_counts_as_a_line_break() {
        let markdown = "intro\r[a](a.md)\r\n[b](b.md)\n\r[c](c.md)";
        let lines: Vec<_> = extract(markdown).iter().map(|l| (l.text.clone(), l.line)).collect();
        assert_eq!(
            lines,
            vec![("a".to_string(), 2), ("b".to_string(), 3), ("c".to_string(), 5)]
        );
    }

    #[test]
    fn test_split_lines_matches_str_lines_for_unix_text() {
        let text = "a\n\nb\n";
        assert_eq!(split_lines(text).collect::<Vec<_>>(), text.lines().collect::<Vec<_>>());
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_skip_anchor_only_links() {
        let links = extract("Jump to [usage](#usage) or [other](other.md#usage)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "other.md#usage");
        assert!(links.iter().all(|l| !l.target.starts_with('#')));
    }

    #[test]
    fn test_empty_display_text_is_allowed() {
        let links = extract("[](logo.png)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "");
    }

    #[test]
    fn test_empty_target_is_not_a_link() {
        assert!(extract("[nothing]()").is_empty());
    }

    #[test]
    fn test_image_links_are_extracted() {
        let links = extract("![diagram](img/arch.svg)");
        assert_eq!(links[0].text, "diagram");
        assert_eq!(links[0].target, "img/arch.svg");
    }

    #[test]
    fn test_no_links() {
        assert!(extract("plain text, [brackets] and (parens)").is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.md");
        let err = extract_links(&missing).unwrap_err();
        assert_eq!(err.path, missing);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_extract_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("README.md");
        std::fs::write(&doc, "intro\r\n[a](a.md) [b](mailto:b@example.com)\r\n").unwrap();

        let links = extract_links(&doc).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.line == 2 && l.source_file == doc));
        assert_eq!(links[1].kind, LinkKind::Remote);
    }
}
