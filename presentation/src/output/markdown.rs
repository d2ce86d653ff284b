//! Markdown helpers shared by the console and tech-spec renderers

use std::path::Path;

/// Fence language for a file path, from its extension
pub fn language_for(path: &str) -> &str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext {
        "ts" | "tsx" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "rs" => "rust",
        "py" => "python",
        "go" => "go",
        "md" => "markdown",
        "yml" | "yaml" => "yaml",
        "sh" => "bash",
        other => other,
    }
}

/// A file body inside a language-tagged code fence
pub fn fenced(path: &str, content: &str) -> String {
    format!("```{}\n{}\n```\n", language_for(path), content)
}

/// Escape text for a single Markdown table cell
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for() {
        assert_eq!(language_for("src/app.tsx"), "typescript");
        assert_eq!(language_for("lib/util.js"), "javascript");
        assert_eq!(language_for("src/main.rs"), "rust");
        assert_eq!(language_for("styles/site.css"), "css");
        assert_eq!(language_for("schema.sql"), "sql");
        assert_eq!(language_for("Makefile"), "");
    }

    #[test]
    fn test_fenced() {
        assert_eq!(fenced("a.py", "x = 1"), "```python\nx = 1\n```\n");
    }

    #[test]
    fn test_table_cell_escapes_pipes() {
        assert_eq!(table_cell("a | b"), "a \\| b");
    }
}
