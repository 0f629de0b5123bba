//! Text analysis: tokenization, readability grading and vocabulary coverage.

pub mod coverage;
pub mod readability;
pub mod tokenizer;

pub use coverage::coverage;
pub use readability::{grade_level, readability_report, syllable_count, ReadabilityReport};
pub use tokenizer::{split_sentences, tokenize_words};
