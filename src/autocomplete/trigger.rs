//! Search-term extraction from the raw input value.

/// Derives the search term from the input text.
///
/// Without a trigger character the whole text is the search term. With one,
/// the term is the whitespace- or newline-delimited word around the character
/// just before the cursor, and only if that word starts with the trigger
/// character. Otherwise the term is empty.
///
/// `cursor` is a character offset.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::extract;
///
/// let text = "ping @ka and @wa";
/// assert_eq!(extract(text, 8, Some('@')), "@ka");
/// assert_eq!(extract(text, 11, Some('@')), "");
/// assert_eq!(extract(text, 3, None), text);
/// ```
pub fn extract(text: &str, cursor: usize, trigger: Option<char>) -> String {
    let Some(trigger) = trigger else {
        return text.to_string();
    };

    let chars: Vec<char> = text.chars().collect();
    let reference = cursor as isize - 1;
    let is_boundary = |c: char| c == ' ' || c == '\n';

    // Nearest boundary at or before the reference index. The backward scan
    // starts at the reference clamped into the text.
    let start = if chars.is_empty() {
        -1
    } else {
        let upto = (reference.max(0) as usize).min(chars.len() - 1);
        chars[..=upto]
            .iter()
            .rposition(|&c| is_boundary(c))
            .map_or(-1, |i| i as isize)
    };

    // Forward scans start at the reference index, clamped to zero.
    let from = reference.max(0) as usize;
    let next = |needle: char| {
        chars
            .iter()
            .skip(from)
            .position(|&c| c == needle)
            .map(|i| i + from)
    };
    let end = match (next(' '), next('\n')) {
        (Some(space), Some(newline)) => space.min(newline),
        (Some(space), None) => space,
        (None, Some(newline)) => newline,
        (None, None) => chars.len(),
    };

    let begin = (start + 1) as usize;
    if begin >= end {
        return String::new();
    }

    let word: String = chars[begin..end].iter().collect();
    if word.starts_with(trigger) {
        word
    } else {
        String::new()
    }
}
