use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").unwrap_or_else(|err| panic!("invalid word pattern: {err}")));

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+").unwrap_or_else(|err| panic!("invalid sentence pattern: {err}"))
});

/// Splits `text` into lowercase words: maximal runs of alphanumeric or `_` characters.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splits `text` on runs of `.`, `!` and `?`, returning trimmed non-empty segments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
