//! Solution response parsing.
//!
//! Models are asked to emit every file between delimiter lines:
//!
//! ```text
//! === FILE: src/cache.rs ===
//! (full file content)
//! === END FILE ===
//! ```
//!
//! followed by a `## Rationale` section. Models do not always comply, so this
//! parser never fails: it returns whatever blocks it can find, possibly none.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Opening marker, path, newline, lazily matched body, literal end marker.
/// The body only stops at `=== END FILE ===`; other `===` lines stay inside.
static FILE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=== FILE:[ \t]*(.+?)[ \t]*===[ \t]*\r?\n(?s:(.*?))=== END FILE ===")
        .expect("file block pattern is valid")
});

static RATIONALE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"##[ \t]*Rationale[ \t]*(?:\r?\n|\z)").expect("rationale pattern is valid")
});

/// One file emitted by a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionFile {
    pub path: String,
    pub content: String,
}

/// Structured view of a raw solution. Derived on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSolution {
    /// Files in order of appearance
    pub files: Vec<SolutionFile>,
    /// Text after the last `## Rationale` heading, trimmed (empty if none)
    pub rationale: String,
}

impl ParsedSolution {
    /// False when the model ignored the file format; callers show raw output instead
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

/// Extract file blocks and the rationale from a model's solve response.
///
/// # Examples
///
/// ```
/// use pantheon_domain::parse_solution_files;
///
/// let text = "=== FILE: a.ts ===\nX\n=== END FILE ===\n## Rationale\nKept it small.";
/// let parsed = parse_solution_files(text);
/// assert_eq!(parsed.files[0].path, "a.ts");
/// assert_eq!(parsed.files[0].content, "X");
/// assert_eq!(parsed.rationale, "Kept it small.");
/// ```
pub fn parse_solution_files(content: &str) -> ParsedSolution {
    let files = FILE_BLOCK
        .captures_iter(content)
        .map(|caps| SolutionFile {
            path: caps[1].trim().to_string(),
            content: caps[2].trim_end().to_string(),
        })
        .collect();

    let rationale = RATIONALE_HEADING
        .find_iter(content)
        .last()
        .map(|m| content[m.end()..].trim().to_string())
        .unwrap_or_default();

    ParsedSolution { files, rationale }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_files_and_rationale() {
        let text = "=== FILE: a.ts ===\nX\n=== END FILE ===\n=== FILE: b.ts ===\nY\n=== END FILE ===\n## Rationale\nZ";
        let parsed = parse_solution_files(text);

        assert_eq!(
            parsed.files,
            vec![
                SolutionFile {
                    path: "a.ts".into(),
                    content: "X".into()
                },
                SolutionFile {
                    path: "b.ts".into(),
                    content: "Y".into()
                },
            ]
        );
        assert_eq!(parsed.rationale, "Z");
    }

    #[test]
    fn test_no_markers_is_not_an_error() {
        let parsed = parse_solution_files("Here is how I would do it: just use a HashMap.");
        assert!(parsed.files.is_empty());
        assert!(!parsed.has_files());
        assert!(parsed.rationale.is_empty());
    }

    #[test]
    fn test_body_keeps_inner_delimiter_lines() {
        let text = "=== FILE: notes.md ===\n=== Section ===\nbody\n=== FILE: fake ===\n=== END FILE ===";
        let parsed = parse_solution_files(text);
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(
            parsed.files[0].content,
            "=== Section ===\nbody\n=== FILE: fake ==="
        );
    }

    #[test]
    fn test_body_trailing_whitespace_trimmed_internal_kept() {
        let text = "=== FILE: src/lib.rs ===\n\n  fn a() {}\n\n  fn b() {}\n\n\n=== END FILE ===";
        let parsed = parse_solution_files(text);
        assert_eq!(parsed.files[0].content, "\n  fn a() {}\n\n  fn b() {}");
    }

    #[test]
    fn test_unterminated_block_ignored() {
        let text = "=== FILE: a.rs ===\nfn a() {}\n=== FILE: b.rs ===\nfn b() {}\n=== END FILE ===";
        let parsed = parse_solution_files(text);
        // The first block swallows everything up to the only end marker.
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].path, "a.rs");

        let parsed = parse_solution_files("=== FILE: a.rs ===\nfn a() {}\n");
        assert!(parsed.files.is_empty());
    }

    #[test]
    fn test_rationale_uses_last_heading() {
        let text = "## Rationale\nfirst draft\n=== FILE: x ===\n## Rationale\n=== END FILE ===\n## Rationale\n  final words  \n";
        let parsed = parse_solution_files(text);
        assert_eq!(parsed.rationale, "final words");
    }

    #[test]
    fn test_crlf_input() {
        let text = "=== FILE: win.txt ===\r\nline\r\n=== END FILE ===\r\n## Rationale\r\nBecause.";
        let parsed = parse_solution_files(text);
        assert_eq!(parsed.files[0].path, "win.txt");
        assert_eq!(parsed.files[0].content, "line");
        assert_eq!(parsed.rationale, "Because.");
    }

    #[test]
    fn test_paths() {
        let parsed = parse_solution_files(
            "=== FILE: a ===\n1\n=== END FILE ===\n=== FILE: b ===\n2\n=== END FILE ===",
        );
        assert_eq!(parsed.paths().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
