//! Text windows around currency mentions.

/// A window of posting text around one currency match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    /// Window text.
    pub text: &'a str,
    /// Byte offset of the window in the full text.
    pub start: usize,
    /// Byte span of the currency match, relative to the window.
    pub anchor: (usize, usize),
}

impl<'a> ContextWindow<'a> {
    /// Cut the window around `match_start..match_end` of `text`.
    pub fn around(
        text: &'a str,
        match_start: usize,
        match_end: usize,
        look_behind: usize,
        look_ahead: usize,
    ) -> Self {
        let (start, end) = context_window(text, match_start, match_end, look_behind, look_ahead);
        let match_start = floor_boundary(text, match_start.clamp(start, end));
        let match_end = floor_boundary(text, match_end.clamp(start, end));

        Self {
            text: &text[start..end],
            start,
            anchor: (match_start - start, match_end - start),
        }
    }
}

/// Compute the window around a match.
///
/// `look_behind` and `look_ahead` count characters. Each edge is then pushed
/// outward while the character just outside it is a digit, `,` or `.`, so a
/// number is never cut in half. Returned offsets are byte offsets on char
/// boundaries.
pub fn context_window(
    text: &str,
    match_start: usize,
    match_end: usize,
    look_behind: usize,
    look_ahead: usize,
) -> (usize, usize) {
    let match_start = floor_boundary(text, match_start.min(text.len()));
    let match_end = floor_boundary(text, match_end.clamp(match_start, text.len()));

    let mut start = text[..match_start]
        .char_indices()
        .rev()
        .take(look_behind)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(match_start);

    let mut end = text[match_end..]
        .char_indices()
        .nth(look_ahead)
        .map(|(i, _)| match_end + i)
        .unwrap_or(text.len());

    while let Some(c) = text[..start].chars().next_back() {
        if !is_number_char(c) {
            break;
        }
        start -= c.len_utf8();
    }

    while let Some(c) = text[end..].chars().next() {
        if !is_number_char(c) {
            break;
        }
        end += c.len_utf8();
    }

    (start, end)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window<'a>(text: &'a str, needle: &str, behind: usize, ahead: usize) -> &'a str {
        let start = text.find(needle).unwrap();
        let (s, e) = context_window(text, start, start + needle.len(), behind, ahead);
        &text[s..e]
    }

    #[test]
    fn test_naive_window() {
        let text = "aaaaaaaaaa salary $ bbbbbbbbbb";
        assert_eq!(window(text, "$", 7, 3), "salary $ bb");
    }

    #[test]
    fn test_expands_over_cut_number() {
        let text = "you will earn 45,000 dollars every year";
        // Five characters back lands on the comma.
        assert_eq!(window(text, "dollars", 5, 6), "45,000 dollars every");
    }

    #[test]
    fn test_expands_forward() {
        let text = "€ 1.234,56 net";
        assert_eq!(window(text, "€", 0, 3), "€ 1.234,56");
    }

    #[test]
    fn test_stops_at_text_edges() {
        let text = "12,500$99.5";
        assert_eq!(window(text, "$", 2, 2), "12,500$99.5");
        assert_eq!(context_window("", 0, 0, 50, 40), (0, 0));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "lön är 35 000 kr per månad för tjänsten";
        let w = window(text, "kr", 9, 10);
        assert_eq!(w, "r 35 000 kr per månad");
    }

    #[test]
    fn test_window_anchor() {
        let text = "salary: $85,000 per year";
        let start = text.find('$').unwrap();
        let window = ContextWindow::around(text, start, start + 1, 50, 40);

        assert_eq!(window.text, text);
        assert_eq!(window.anchor, (8, 9));
    }
}
