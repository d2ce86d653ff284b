//! String utilities for rendering model output.

/// Split `s` after at most `max_chars` characters.
///
/// Returns the kept prefix and the number of characters left out. Cuts on
/// character boundaries, so multi-byte text is never split mid-codepoint.
pub fn clip_chars(s: &str, max_chars: usize) -> (&str, usize) {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&s[..byte_idx], s[byte_idx..].chars().count()),
        None => (s, 0),
    }
}

/// First line of `s` limited to `max_chars` characters, trimmed.
pub fn one_line(s: &str, max_chars: usize) -> &str {
    let line = s.lines().next().unwrap_or("").trim();
    clip_chars(line, max_chars).0
}
