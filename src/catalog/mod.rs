//! Transcript ingestion and the in-memory catalog.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReadalongError, Result};
use crate::storage;
use crate::text::grade_level;
use crate::types::{TranscriptItem, TranscriptRecord};

const GRADE_TOLERANCE: f64 = 1e-9;

/// Grades one record. Transcripts without words are rejected.
pub fn ingest_record(record: TranscriptRecord) -> Result<TranscriptItem> {
    let grade = grade_level(&record.transcript)
        .ok_or_else(|| ReadalongError::empty_transcript(&record.title))?;
    debug!(title = %record.title, grade, "graded transcript");
    Ok(TranscriptItem {
        title: record.title,
        transcript: record.transcript,
        grade_level: grade,
    })
}

/// Grades every record, failing on the first empty transcript.
pub fn ingest<I>(records: I) -> Result<Vec<TranscriptItem>>
where
    I: IntoIterator<Item = TranscriptRecord>,
{
    records.into_iter().map(ingest_record).collect()
}

/// Reads a JSON array of `{title, transcript}` records.
pub fn load_records(path: &Path) -> Result<Vec<TranscriptRecord>> {
    storage::read_json(path, "transcript records")
}

/// Ingests every `*.txt` file in `dir`, titled by file stem, in file-name order.
pub fn ingest_dir(dir: &Path) -> Result<Vec<TranscriptItem>> {
    let entries = fs::read_dir(dir).map_err(|err| {
        ReadalongError::io(format!("listing transcript directory {}", dir.display()), err)
    })?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            ReadalongError::io(format!("listing transcript directory {}", dir.display()), err)
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ReadalongError::invalid_input(format!("transcript path {:?} has no name", path))
            })?;
        let transcript = fs::read_to_string(&path)
            .map_err(|err| ReadalongError::io(format!("reading {}", path.display()), err))?;
        records.push(TranscriptRecord { title, transcript });
    }
    if records.is_empty() {
        warn!(dir = %dir.display(), "no .txt transcripts found");
    }
    ingest(records)
}

/// Ordered list of graded transcripts. Titles need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<TranscriptItem>,
}

impl Catalog {
    pub fn new(items: Vec<TranscriptItem>) -> Self {
        Self { items }
    }

    /// Loads a saved catalog; a missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog: Self = storage::read_json_or_default(path, "catalog")?;
        info!(path = %path.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        storage::write_json(path, self, "catalog")?;
        info!(path = %path.display(), items = self.len(), "catalog saved");
        Ok(())
    }

    pub fn push(&mut self, item: TranscriptItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = TranscriptItem>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[TranscriptItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last item ingested under `title`.
    pub fn find(&self, title: &str) -> Option<&TranscriptItem> {
        self.items.iter().rev().find(|item| item.title == title)
    }

    /// True when every stored grade matches a fresh computation from its text.
    pub fn is_consistent(&self) -> bool {
        self.items.iter().all(|item| {
            grade_level(&item.transcript)
                .is_some_and(|grade| (grade - item.grade_level).abs() <= GRADE_TOLERANCE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(title: &str, transcript: &str) -> TranscriptRecord {
        TranscriptRecord {
            title: title.to_string(),
            transcript: transcript.to_string(),
        }
    }

    #[test]
    fn ingest_attaches_grade() {
        let items = ingest(vec![record("cats", "The cat sat on the mat. The dog ran fast.")])
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_relative_eq!(items[0].grade_level, -1.84, epsilon = 1e-9);
    }

    #[test]
    fn ingest_rejects_empty_transcript() {
        let err = ingest(vec![record("ok", "Fine."), record("blank", "  \n")]).unwrap_err();
        match err {
            ReadalongError::EmptyTranscript { title } => assert_eq!(title, "blank"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicates_are_kept_and_last_wins_on_lookup() {
        let mut catalog = Catalog::default();
        catalog.extend(ingest(vec![record("clip", "One two."), record("clip", "Three.")]).unwrap());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("clip").unwrap().transcript, "Three.");
        assert!(catalog.find("missing").is_none());
        assert!(catalog.is_consistent());
    }

    #[test]
    fn tampered_grade_is_inconsistent() {
        let mut items = ingest(vec![record("clip", "One two.")]).unwrap();
        items[0].grade_level += 1.0;
        assert!(!Catalog::new(items).is_consistent());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/catalog.json");
        assert!(Catalog::load(&path).unwrap().is_empty());

        let catalog = Catalog::new(ingest(vec![record("a", "Hello there.")]).unwrap());
        catalog.save(&path).unwrap();
        assert_eq!(Catalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn ingest_dir_reads_txt_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_second.txt"), "Second clip here.").unwrap();
        fs::write(dir.path().join("a_first.txt"), "First clip.").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let items = ingest_dir(dir.path()).unwrap();
        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["a_first", "b_second"]);
    }
}
