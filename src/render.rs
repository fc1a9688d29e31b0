//! Markdown-to-post rendering.
//!
//! Facebook feed posts are plain text, so queued markdown is flattened by a
//! single line-by-line pass of prefix rules. There is no grammar, no nesting,
//! and no inline-markup handling: headings lose their markers, quotes and
//! bullets get unicode stand-ins, everything else passes through trimmed.
//!
//! | prefix             | becomes                          |
//! |--------------------|----------------------------------|
//! | `# ` / `## `       | heading text on its own line     |
//! | `### `             | heading text + `: ` (run-in)     |
//! | `>`                | `💬 ` + quoted text               |
//! | `* ` / `- `        | `• ` + item text                 |
//! | `1. `              | kept verbatim                    |
//! | `---` / `***`      | a 30-character rule              |
//!
//! The configured hashtag line is appended, and the result is truncated to
//! the feed limit without splitting a character.

/// Hard cap on post length accepted by the feed endpoint.
pub const MAX_POST_CHARS: usize = 5000;

/// Convert queued markdown into page-ready plain text.
///
/// Appends `hashtags` after a blank line and truncates to
/// [`MAX_POST_CHARS`] characters.
pub fn render_post(markdown: &str, hashtags: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + hashtags.len() + 2);

    for line in markdown.trim().lines() {
        if let Some(rest) = line.strip_prefix("# ") {
            out.push_str(rest.trim());
            out.push('\n');
        } else if let Some(rest) = line.strip_prefix("## ") {
            out.push_str(rest.trim());
            out.push('\n');
        } else if let Some(rest) = line.strip_prefix("### ") {
            out.push_str(rest.trim());
            out.push_str(": ");
        } else if let Some(rest) = line.strip_prefix('>') {
            out.push_str("💬 ");
            out.push_str(rest.trim());
            out.push('\n');
        } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            out.push_str("• ");
            out.push_str(rest.trim());
            out.push('\n');
        } else if line.starts_with("1. ") {
            out.push_str(line);
            out.push('\n');
        } else if line.trim() == "---" || line.trim() == "***" {
            out.push_str(&"─".repeat(30));
            out.push('\n');
        } else if !line.trim().is_empty() {
            out.push_str(line.trim());
            out.push('\n');
        } else {
            out.push('\n');
        }
    }

    out.push_str("\n\n");
    out.push_str(hashtags);

    truncate_chars(&out, MAX_POST_CHARS).trim().to_string()
}

/// Truncate to `max` characters, replacing the tail with `...` if needed.
///
/// Counts characters, not bytes; emoji-heavy posts must never be cut
/// mid-character.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{kept}...")
    }
}
