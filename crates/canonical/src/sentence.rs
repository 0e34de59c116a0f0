/// Characters that end a sentence. The terminator stays with its sentence.
const TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?', '；', ';'];

/// Returns `true` when `ch` ends a sentence.
pub fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

/// Splits `text` into sentences.
///
/// A sentence runs up to and including the next terminator; trailing text
/// without a terminator becomes the final sentence. Every sentence is
/// trimmed and whitespace-only pieces are dropped, so `"a.. b"` yields
/// `["a.", ".", "b"]`.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if is_terminator(ch) {
            let end = idx + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        push_trimmed(&mut sentences, &text[start..]);
    }

    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}
