//! Catalog selection by reading level or by vocabulary coverage.
//!
//! Both selectors make one pass over the catalog and keep the first item
//! that achieves the best metric, so results are deterministic for a given
//! catalog order. An empty catalog, an undefined target level, or an empty
//! known-word set yields no recommendation.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::session::LearnerSession;
use crate::text::coverage;
use crate::types::{MetricKind, Recommendation, TranscriptItem, WordMastery};

/// Grades above the learner's stated level that recommendations aim for.
pub const LEVEL_STRETCH: f64 = 1.0;
pub const DEFAULT_MAX_NEW_WORDS: usize = 1;
pub const DEFAULT_RANK_LIMIT: usize = 20;

/// Picks the item whose grade is closest to `level + LEVEL_STRETCH`.
pub fn recommend_by_level(catalog: &[TranscriptItem], level: f64) -> Option<Recommendation<'_>> {
    let target = level + LEVEL_STRETCH;
    let mut best: Option<(&TranscriptItem, f64)> = None;
    for item in catalog {
        let diff = (item.grade_level - target).abs();
        if !diff.is_finite() {
            continue;
        }
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((item, diff)),
        }
    }
    best.map(|(item, metric)| Recommendation {
        item,
        metric,
        metric_kind: MetricKind::GradeDiff,
    })
}

/// Picks the item with the highest share of words in `known_words`.
pub fn recommend_by_coverage<'a, S>(
    catalog: &'a [TranscriptItem],
    known_words: &HashSet<String, S>,
) -> Option<Recommendation<'a>>
where
    S: std::hash::BuildHasher,
{
    if known_words.is_empty() {
        return None;
    }
    let mut best: Option<(&TranscriptItem, f64)> = None;
    for item in catalog {
        let score = coverage(&item.transcript, known_words);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((item, score)),
        }
    }
    best.map(|(item, metric)| Recommendation {
        item,
        metric,
        metric_kind: MetricKind::Coverage,
    })
}

/// Vocabulary attached to a video by the metadata service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoVocabulary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub score: i64,
    pub word_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedVideo {
    pub id: u64,
    pub title: String,
    pub new_word_count: usize,
}

/// Videos with at most `max_new` unknown words, best-scored first.
///
/// A word is new when the learner's mastery of it is `Unknown`, including
/// words the learner has never interacted with. Videos without any
/// vocabulary are skipped. Equal scores keep input order.
pub fn rank_by_new_words(
    videos: &[VideoVocabulary],
    session: &LearnerSession,
    max_new: usize,
    limit: usize,
) -> Vec<RankedVideo> {
    let mut candidates: Vec<(&VideoVocabulary, usize)> = videos
        .iter()
        .filter(|video| !video.word_ids.is_empty())
        .map(|video| {
            let distinct: BTreeSet<u64> = video.word_ids.iter().copied().collect();
            let new_words = distinct
                .into_iter()
                .filter(|word_id| session.mastery(*word_id) == WordMastery::Unknown)
                .count();
            (video, new_words)
        })
        .filter(|(_, new_words)| *new_words <= max_new)
        .collect();
    candidates.sort_by(|(a, _), (b, _)| b.score.cmp(&a.score));
    candidates
        .into_iter()
        .take(limit)
        .map(|(video, new_word_count)| RankedVideo {
            id: video.id,
            title: video.title.clone(),
            new_word_count,
        })
        .collect()
}
