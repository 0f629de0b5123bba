//! Learner-owned state: known vocabulary and per-word mastery.
//!
//! A [`LearnerSession`] is passed explicitly into every operation that needs
//! learner context; nothing here is global. Writes are additive or
//! single-field overwrites, so concurrent surfaces can persist with
//! last-write-wins.

mod known_words;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tracing::info;

use crate::error::Result;
use crate::storage;
use crate::types::{MasteryUpdate, Token, WordMastery};

pub use known_words::{normalize_words, KnownWordSet};

/// What the session remembers about one word id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub mastery: WordMastery,
    #[serde(default)]
    pub seen_count: u32,
}

/// Number of tracked words per mastery level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MasterySummary {
    pub unknown: usize,
    pub learning: usize,
    pub mastered: usize,
}

impl MasterySummary {
    pub fn count(&self, level: WordMastery) -> usize {
        match level {
            WordMastery::Unknown => self.unknown,
            WordMastery::Learning => self.learning,
            WordMastery::Mastered => self.mastered,
        }
    }

    fn count_mut(&mut self, level: WordMastery) -> &mut usize {
        match level {
            WordMastery::Unknown => &mut self.unknown,
            WordMastery::Learning => &mut self.learning,
            WordMastery::Mastered => &mut self.mastered,
        }
    }

    pub fn total(&self) -> usize {
        WordMastery::ALL.iter().map(|level| self.count(*level)).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerSession {
    #[serde(default)]
    pub known_words: KnownWordSet,
    #[serde(default)]
    words: BTreeMap<u64, WordRecord>,
}

impl LearnerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a saved session; a missing file yields a fresh session.
    pub fn load(path: &Path) -> Result<Self> {
        let session: Self = storage::read_json_or_default(path, "learner session")?;
        info!(
            path = %path.display(),
            known_words = session.known_words.len(),
            tracked_words = session.words.len(),
            "learner session loaded"
        );
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        storage::write_json(path, self, "learner session")?;
        info!(path = %path.display(), "learner session saved");
        Ok(())
    }

    /// Adds whitespace-delimited words to the known set; returns how many were new.
    pub fn add_words(&mut self, raw: &str) -> usize {
        self.known_words.add_words(raw)
    }

    /// Mastery of `word_id`, `Unknown` when never recorded.
    pub fn mastery(&self, word_id: u64) -> WordMastery {
        self.words
            .get(&word_id)
            .map(|record| record.mastery)
            .unwrap_or_default()
    }

    pub fn record(&self, word_id: u64) -> Option<&WordRecord> {
        self.words.get(&word_id)
    }

    /// Overwrites the mastery of `word_id`. Any level may follow any other.
    pub fn set_mastery(&mut self, word_id: u64, mastery: WordMastery) -> MasteryUpdate {
        self.words.entry(word_id).or_default().mastery = mastery;
        MasteryUpdate { word_id, mastery }
    }

    /// The learner clicked a token they are now studying.
    pub fn mark_learning(&mut self, word_id: u64) -> MasteryUpdate {
        self.set_mastery(word_id, WordMastery::Learning)
    }

    /// Quiz answer: one level up when correct, one level down otherwise.
    pub fn record_answer(&mut self, word_id: u64, correct: bool) -> MasteryUpdate {
        let record = self.words.entry(word_id).or_default();
        record.seen_count = record.seen_count.saturating_add(1);
        record.mastery = if correct {
            record.mastery.promoted()
        } else {
            record.mastery.demoted()
        };
        MasteryUpdate {
            word_id,
            mastery: record.mastery,
        }
    }

    /// A token counts as known once its word is being learned or mastered,
    /// or when its text is in the known-word set.
    pub fn is_known_token(&self, token: &Token) -> bool {
        self.mastery(token.word_id) >= WordMastery::Learning
            || self.known_words.contains(&token.text.to_lowercase())
    }

    pub fn mastery_summary(&self) -> MasterySummary {
        let mut summary = MasterySummary::default();
        for record in self.words.values() {
            *summary.count_mut(record.mastery) += 1;
        }
        summary
    }

    /// Recorded words at or above `min` mastery, by ascending id.
    pub fn words_at_least(&self, min: WordMastery) -> impl Iterator<Item = (u64, &WordRecord)> {
        self.words
            .iter()
            .filter(move |(_, record)| record.mastery >= min)
            .map(|(word_id, record)| (*word_id, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mastery_defaults_to_unknown() {
        let session = LearnerSession::new();
        assert_eq!(session.mastery(42), WordMastery::Unknown);
        assert!(session.record(42).is_none());
    }

    #[test]
    fn overwrite_allows_downgrade() {
        let mut session = LearnerSession::new();
        session.set_mastery(1, WordMastery::Mastered);
        let update = session.set_mastery(1, WordMastery::Unknown);
        assert_eq!(
            update,
            MasteryUpdate {
                word_id: 1,
                mastery: WordMastery::Unknown
            }
        );
        assert_eq!(session.mastery(1), WordMastery::Unknown);
    }

    #[test]
    fn quiz_answers_step_and_count() {
        let mut session = LearnerSession::new();
        session.record_answer(5, true);
        session.record_answer(5, true);
        let update = session.record_answer(5, true);
        assert_eq!(update.mastery, WordMastery::Mastered);
        session.record_answer(5, false);
        assert_eq!(session.mastery(5), WordMastery::Learning);
        assert_eq!(session.record(5).unwrap().seen_count, 4);

        session.record_answer(6, false);
        assert_eq!(session.mastery(6), WordMastery::Unknown);
    }

    #[test]
    fn summary_counts_each_level() {
        let mut session = LearnerSession::new();
        session.set_mastery(1, WordMastery::Unknown);
        session.mark_learning(2);
        session.mark_learning(3);
        session.set_mastery(4, WordMastery::Mastered);
        let summary = session.mastery_summary();
        assert_eq!(
            summary,
            MasterySummary {
                unknown: 1,
                learning: 2,
                mastered: 1
            }
        );
        assert_eq!(summary.total(), 4);
        let per_level: Vec<(&str, usize)> = WordMastery::ALL
            .iter()
            .map(|level| (level.as_str(), summary.count(*level)))
            .collect();
        assert_eq!(
            per_level,
            vec![("unknown", 1), ("learning", 2), ("mastered", 1)]
        );
        let ids: Vec<u64> = session
            .words_at_least(WordMastery::Learning)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn known_token_by_mastery_or_text() {
        let mut session = LearnerSession::new();
        session.add_words("Hola");
        session.mark_learning(2);
        assert!(session.is_known_token(&Token::new(1, "HOLA", 0.0, 1.0)));
        assert!(session.is_known_token(&Token::new(2, "mundo", 1.0, 2.0)));
        assert!(!session.is_known_token(&Token::new(3, "adiós", 2.0, 3.0)));
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = LearnerSession::new();
        session.add_words("cat dog");
        session.record_answer(9, true);
        let json = serde_json::to_string(&session).unwrap();
        let restored: LearnerSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
