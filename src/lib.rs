//! Reading-level and vocabulary-aware transcript recommendation, plus
//! caption alignment for interactive read-along playback.

pub mod alignment;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod recommend;
pub mod session;
pub mod storage;
pub mod text;
pub mod types;

pub use catalog::Catalog;
pub use error::{ReadalongError, Result};
pub use session::{KnownWordSet, LearnerSession};
pub use types::{
    CaptionLine, MasteryUpdate, MetricKind, Recommendation, Token, TranscriptItem,
    TranscriptRecord, WordMastery,
};
