/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut `text` to at most `max_len` characters, marking the cut with `...`
///
/// Widths under four have no room for the marker and are cut bare.
pub fn truncate(text: &str, max_len: usize) -> String {
    const MARKER: &str = "...";

    if text.chars().nth(max_len).is_none() {
        return text.to_string();
    }
    if max_len <= MARKER.len() {
        return text.chars().take(max_len).collect();
    }

    let mut cut: String = text.chars().take(max_len - MARKER.len()).collect();
    cut.push_str(MARKER);
    cut
}

/// Collapse newlines and runs of whitespace into single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
