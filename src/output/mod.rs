// Output formatting: terminal display for the CLI commands.

pub mod terminal;

/// Shorten `text` to `max_chars` characters, marking the cut with "...".
///
/// Cuts on a char boundary, so Devanagari messages and model replies are safe
/// to preview.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
