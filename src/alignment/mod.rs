//! Caption-line alignment of word tokens and playback tracking.

pub mod aligner;
pub mod cursor;

use serde::Serialize;

use crate::error::{ReadalongError, Result};
use crate::session::LearnerSession;
use crate::types::{validate_interval, CaptionLine, Token, WordMastery};

pub use aligner::{align_tokens, assign_lines, dropped_tokens};
pub use cursor::{active_line, PlaybackCursor, DEFAULT_POLL_INTERVAL};

/// A token prepared for display with its learner-specific state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView {
    pub word_id: u64,
    pub text: String,
    pub start_sec: f64,
    pub end_sec: f64,
    pub mastery: WordMastery,
    pub known: bool,
}

/// One caption line with its tokens and highlight flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub start_sec: f64,
    pub end_sec: f64,
    pub active: bool,
    pub tokens: Vec<TokenView>,
}

/// Checks the ordering contract the aligner relies on.
///
/// Every interval must be finite and non-empty, and both lists must be
/// sorted by `start_sec` without overlaps.
pub fn validate_timeline(lines: &[CaptionLine], tokens: &[Token]) -> Result<()> {
    for (idx, line) in lines.iter().enumerate() {
        validate_interval("caption line", idx, line.start_sec, line.end_sec)?;
    }
    for (idx, token) in tokens.iter().enumerate() {
        validate_interval("token", idx, token.start_sec, token.end_sec)?;
    }
    if let Some(idx) = first_overlap(lines.iter().map(|l| (l.start_sec, l.end_sec))) {
        return Err(ReadalongError::invalid_input(format!(
            "caption line {idx} starts before the previous line ends"
        )));
    }
    if let Some(idx) = first_overlap(tokens.iter().map(|t| (t.start_sec, t.end_sec))) {
        return Err(ReadalongError::invalid_input(format!(
            "token {idx} starts before the previous token ends"
        )));
    }
    Ok(())
}

fn first_overlap(intervals: impl Iterator<Item = (f64, f64)>) -> Option<usize> {
    let mut prev_end = f64::NEG_INFINITY;
    for (idx, (start, end)) in intervals.enumerate() {
        if start < prev_end {
            return Some(idx);
        }
        prev_end = end;
    }
    None
}

/// Aligns tokens to lines and decorates them for a highlight view.
///
/// `playback_sec` marks the line active at that time, if any.
pub fn render_lines(
    lines: &[CaptionLine],
    tokens: &[Token],
    session: &LearnerSession,
    playback_sec: Option<f64>,
) -> Vec<LineView> {
    let active = playback_sec.and_then(|t| active_line(lines, t));
    lines
        .iter()
        .zip(align_tokens(lines, tokens))
        .enumerate()
        .map(|(idx, (line, group))| LineView {
            start_sec: line.start_sec,
            end_sec: line.end_sec,
            active: active == Some(idx),
            tokens: group
                .into_iter()
                .map(|token| TokenView {
                    word_id: token.word_id,
                    text: token.text.clone(),
                    start_sec: token.start_sec,
                    end_sec: token.end_sec,
                    mastery: session.mastery(token.word_id),
                    known: session.is_known_token(token),
                })
                .collect(),
        })
        .collect()
}
