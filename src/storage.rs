//! JSON file helpers for the caller-side persistence used by the CLI.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ReadalongError, Result};

/// Reads `path` as JSON, or returns `T::default()` when the file does not exist.
pub(crate) fn read_json_or_default<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!(path = %path.display(), what, "no saved file; starting empty");
        return Ok(T::default());
    }
    read_json(path, what)
}

/// Reads and parses a JSON file that must exist.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let data = fs::read_to_string(path)
        .map_err(|err| ReadalongError::io(format!("reading {what} {}", path.display()), err))?;
    serde_json::from_str(&data)
        .map_err(|err| ReadalongError::json(format!("parsing {what} {}", path.display()), err))
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
///
/// The data goes to a temporary sibling file that is renamed over `path`, so
/// an interrupted write leaves the previous contents intact.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, what: &str) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|err| {
                ReadalongError::io(format!("creating directory {}", parent.display()), err)
            })?;
            parent
        }
        None => Path::new("."),
    };
    let data = serde_json::to_string_pretty(value)
        .map_err(|err| ReadalongError::json(format!("serializing {what}"), err))?;

    let write_err =
        |err: std::io::Error| ReadalongError::io(format!("writing {what} {}", path.display()), err);
    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    staged.write_all(data.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(path).map_err(|err| write_err(err.error))?;
    debug!(path = %path.display(), what, bytes = data.len(), "saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "stale and much longer than the new contents").unwrap();

        write_json(&path, &vec![1, 2, 3], "numbers").unwrap();
        let restored: Vec<i32> = read_json(&path, "numbers").unwrap();
        assert_eq!(restored, vec![1, 2, 3]);

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_file_reads_as_default_but_required_read_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let empty: Vec<String> = read_json_or_default(&path, "words").unwrap();
        assert!(empty.is_empty());
        let err = read_json::<Vec<String>>(&path, "words").unwrap_err();
        assert!(matches!(err, ReadalongError::Io { .. }));
    }
}
