/// Returns the prefix of `text` holding at most `max_chars` codepoints.
///
/// The cut always lands on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Truncates `text` to `max_chars` codepoints and appends `marker` when
/// anything was cut off.
pub fn ellipsize(text: &str, max_chars: usize, marker: &str) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() == text.len() {
        text.to_string()
    } else {
        format!("{head}{marker}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn counts_codepoints_not_bytes() {
        assert_eq!(truncate_chars("数据结构与算法", 4), "数据结构");
        assert_eq!(truncate_chars("a😀b", 2), "a😀");
    }

    #[test]
    fn zero_limit_yields_empty() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn ellipsize_only_marks_cut_text() {
        assert_eq!(ellipsize("hello", 5, "..."), "hello");
        assert_eq!(ellipsize("hello world", 5, "..."), "hello...");
        assert_eq!(ellipsize("笔记笔记", 2, "..."), "笔记...");
    }
}
