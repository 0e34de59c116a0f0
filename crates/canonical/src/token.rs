/// Punctuation treated as a token boundary, in addition to Unicode whitespace.
///
/// Covers the ASCII and full-width CJK forms of commas, periods, colons,
/// semicolons, brackets, quotes and dashes.
const SEPARATORS: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '-', //
    '，', '。', '！', '？', '；', '：', '（', '）', '【', '】', '《', '》', '「', '」', '『',
    '』', '“', '”', '‘', '’', '、', '—',
];

/// Returns `true` when `ch` separates two tokens.
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || SEPARATORS.contains(&ch)
}

/// Splits `text` into lowercase tokens.
///
/// Tokens are maximal runs of characters that are neither whitespace nor
/// one of the separator punctuation marks. Empty tokens never appear in the
/// output. The function is pure and works on any script; a CJK run with no
/// separators inside stays a single token.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if is_separator(ch) {
            if let Some(token_start) = start.take() {
                tokens.push(text[token_start..idx].to_lowercase());
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(token_start) = start {
        tokens.push(text[token_start..].to_lowercase());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_lowercases() {
        assert_eq!(tokenize("  The Quick\tBROWN\nfox "), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn splits_on_ascii_punctuation() {
        assert_eq!(
            tokenize("hello,world.(rust)[x]{y}\"q\" 'a' well-known; a:b"),
            vec!["hello", "world", "rust", "x", "y", "q", "a", "well", "known", "a", "b"]
        );
    }

    #[test]
    fn splits_on_cjk_punctuation() {
        assert_eq!(
            tokenize("数据结构，算法。（复习）“笔记”"),
            vec!["数据结构", "算法", "复习", "笔记"]
        );
    }

    #[test]
    fn drops_empty_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,,, ... ！？ ").is_empty());
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(tokenize("CS_101 2024"), vec!["cs_101", "2024"]);
    }
}
