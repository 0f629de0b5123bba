//! Core data model shared by scoring, recommendation and alignment

use serde::{Deserialize, Serialize};

use crate::error::{ReadalongError, Result};

/// A catalog entry with its precomputed reading difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub title: String,
    pub transcript: String,
    /// Computed once at ingestion from `transcript`.
    pub grade_level: f64,
}

/// Raw ingestion record, before a grade level has been attached
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRecord {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(alias = "text")]
    pub transcript: String,
}

/// A single word occurrence with its playback interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub word_id: u64,
    #[serde(default)]
    pub text: String,
    pub start_sec: f64, // seconds
    pub end_sec: f64,   // seconds
}

impl Token {
    pub fn new(word_id: u64, text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            word_id,
            text: text.into(),
            start_sec,
            end_sec,
        }
    }
}

/// Interval during which one caption line is on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub start_sec: f64,
    pub end_sec: f64,
}

impl CaptionLine {
    pub fn new(start_sec: f64, end_sec: f64) -> Self {
        Self { start_sec, end_sec }
    }

    /// Half-open containment: `[start_sec, end_sec)`.
    pub fn contains(&self, t: f64) -> bool {
        self.start_sec <= t && t < self.end_sec
    }
}

/// Per-word familiarity state of a learner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WordMastery {
    #[default]
    Unknown,
    Learning,
    Mastered,
}

impl WordMastery {
    pub const ALL: [WordMastery; 3] = [
        WordMastery::Unknown,
        WordMastery::Learning,
        WordMastery::Mastered,
    ];

    /// One level up, saturating at `Mastered`.
    pub fn promoted(self) -> Self {
        match self {
            WordMastery::Unknown => WordMastery::Learning,
            WordMastery::Learning | WordMastery::Mastered => WordMastery::Mastered,
        }
    }

    /// One level down, saturating at `Unknown`.
    pub fn demoted(self) -> Self {
        match self {
            WordMastery::Mastered => WordMastery::Learning,
            WordMastery::Learning | WordMastery::Unknown => WordMastery::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordMastery::Unknown => "unknown",
            WordMastery::Learning => "learning",
            WordMastery::Mastered => "mastered",
        }
    }
}

impl std::str::FromStr for WordMastery {
    type Err = ReadalongError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "unknown" => Ok(WordMastery::Unknown),
            "learning" => Ok(WordMastery::Learning),
            "mastered" => Ok(WordMastery::Mastered),
            other => Err(ReadalongError::invalid_input(format!(
                "unrecognized mastery level \"{other}\""
            ))),
        }
    }
}

/// Intent emitted when a learner changes a word's mastery; persisted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryUpdate {
    pub word_id: u64,
    pub mastery: WordMastery,
}

/// Which objective produced a recommendation metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    GradeDiff,
    Coverage,
}

/// Transient result of a recommendation query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub item: &'a TranscriptItem,
    pub metric: f64,
    pub metric_kind: MetricKind,
}

/// Rejects non-finite or empty intervals in a caption/token timeline.
pub fn validate_interval(label: &str, index: usize, start_sec: f64, end_sec: f64) -> Result<()> {
    if !start_sec.is_finite() || !end_sec.is_finite() {
        return Err(ReadalongError::invalid_input(format!(
            "{label} {index} has a non-finite timestamp"
        )));
    }
    if start_sec >= end_sec {
        return Err(ReadalongError::invalid_input(format!(
            "{label} {index} must start before it ends ({start_sec:.3} >= {end_sec:.3})"
        )));
    }
    Ok(())
}
