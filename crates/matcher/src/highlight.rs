use regex::RegexBuilder;

/// Excerpt length in codepoints before the `...` marker.
pub const EXCERPT_CHARS: usize = 180;

/// Wraps every case-insensitive occurrence of each token in `<em>..</em>`.
///
/// Tokens are applied one after another, each on the output of the previous
/// one, so a later token can match inside markup an earlier token inserted
/// (`em` will). Original casing of the matched text is preserved.
pub fn highlight(text: &str, tokens: &[String]) -> String {
    let mut out = text.to_string();
    if out.is_empty() {
        return out;
    }
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let re = match RegexBuilder::new(&regex::escape(token))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(_) => continue,
        };
        out = re.replace_all(&out, "<em>$0</em>").into_owned();
    }
    out
}

/// Tokenizes `query` and highlights its tokens in `text`.
pub fn highlight_query(text: &str, query: &str) -> String {
    highlight(text, &canonical::tokenize(query))
}

/// Short preview of a note: the description when it has text, else the
/// content, cut to [`EXCERPT_CHARS`] codepoints with `...` appended when cut.
pub fn excerpt(description: &str, content: &str) -> String {
    let source = if description.trim().is_empty() {
        content
    } else {
        description
    };
    canonical::ellipsize(source, EXCERPT_CHARS, "...")
}
