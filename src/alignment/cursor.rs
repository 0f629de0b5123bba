use std::time::Duration;

use crate::types::CaptionLine;

/// Default sampling period for the playback clock.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Index of the first line whose `[start_sec, end_sec)` contains `t`.
pub fn active_line(lines: &[CaptionLine], t: f64) -> Option<usize> {
    lines.iter().position(|line| line.contains(t))
}

/// Tracks the active line across successive clock samples.
///
/// Each sample is evaluated from scratch, so seeks and rewinds need no
/// special handling; only the previous answer is remembered to report changes.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    active: Option<usize>,
    last_sample: Option<f64>,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active line as of the most recent sample.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn last_sample(&self) -> Option<f64> {
        self.last_sample
    }

    /// Records a clock sample; returns the new active line if it changed.
    ///
    /// The outer `Option` is `None` when the highlight should stay as is.
    pub fn sample(&mut self, lines: &[CaptionLine], t: f64) -> Option<Option<usize>> {
        let next = active_line(lines, t);
        self.last_sample = Some(t);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    /// Forget the current highlight, e.g. when the transcript is replaced.
    pub fn reset(&mut self) {
        self.active = None;
        self.last_sample = None;
    }
}
