use std::collections::HashSet;

use super::tokenizer::tokenize_words;

/// Fraction of the words in `text` that appear in `known_words`, in `[0, 1]`.
///
/// Membership is an exact match against lowercase entries; a text with no
/// words scores `0`.
pub fn coverage<S>(text: &str, known_words: &HashSet<String, S>) -> f64
where
    S: std::hash::BuildHasher,
{
    let words = tokenize_words(text);
    if words.is_empty() {
        return 0.0;
    }
    let known = words
        .iter()
        .filter(|word| known_words.contains(word.as_str()))
        .count();
    known as f64 / words.len() as f64
}
