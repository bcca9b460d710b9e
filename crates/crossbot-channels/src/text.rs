//! Helpers shared by the platform renderers.

/// Cut `s` to at most `max` characters without splitting a character.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Join an optional emoji and a label with one space, skipping whichever is empty.
pub fn labeled(emoji: &str, label: &str) -> String {
    match (emoji.is_empty(), label.is_empty()) {
        (true, _) => label.to_string(),
        (false, true) => emoji.to_string(),
        (false, false) => format!("{} {}", emoji, label),
    }
}
