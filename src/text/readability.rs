//! Flesch-Kincaid grade level estimation.
//!
//! Formula: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Syllables come from a vowel-run heuristic rather than a dictionary, so the
//! grade is an approximation. It is a pure function of the text: the same
//! transcript always grades the same.

use serde::Serialize;

use super::tokenizer::{split_sentences, tokenize_words};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Counts used to derive a grade, alongside the grade itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub grade: f64,
    pub words: usize,
    /// Number of sentences, at least 1 whenever there are words.
    pub sentences: usize,
    pub syllables: usize,
}

/// Approximate syllable count of a single word; never less than 1.
pub fn syllable_count(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut in_vowel_run = false;
    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !in_vowel_run {
            count += 1;
        }
        in_vowel_run = is_vowel;
    }
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Full readability breakdown, or `None` when the text has no words.
pub fn readability_report(text: &str) -> Option<ReadabilityReport> {
    let words = tokenize_words(text);
    if words.is_empty() {
        return None;
    }
    let sentences = split_sentences(text).len().max(1);
    let syllables: usize = words.iter().map(|word| syllable_count(word)).sum();

    let word_count = words.len() as f64;
    let words_per_sentence = word_count / sentences as f64;
    let syllables_per_word = syllables as f64 / word_count;
    let grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;

    Some(ReadabilityReport {
        grade,
        words: words.len(),
        sentences,
        syllables,
    })
}

/// Grade level of `text`; `None` means the grade is undefined (no words).
pub fn grade_level(text: &str) -> Option<f64> {
    readability_report(text).map(|report| report.grade)
}
