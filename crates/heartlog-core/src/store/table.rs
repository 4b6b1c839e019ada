//! Whole-file JSON table helpers.
//!
//! Every table is a JSON array rewritten in full on each write.

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};

/// Read a table for display. Missing or malformed files read as `None`.
pub(super) fn read_lenient<T: DeserializeOwned>(path: &Path) -> Option<Vec<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Table unreadable");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(rows) => Some(rows),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Table malformed");
            None
        }
    }
}

/// Read a table before rewriting it. A missing file is an empty table;
/// a malformed one is an error so the rewrite cannot silently drop rows.
pub(super) fn read_strict<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(Error::storage(path, e)),
    }
}

/// Replace the whole table.
pub(super) fn write<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    write_json(path, rows)
}

pub(super) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(|e| Error::storage(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(read_lenient::<u32>(&path).is_none());
        assert!(read_strict::<u32>(&path).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "date,title\n2024-01-01,hi").unwrap();

        assert!(read_lenient::<u32>(&path).is_none());
        assert!(matches!(
            read_strict::<u32>(&path),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("numbers.json");

        write(&path, &[3u32, 1, 2]).unwrap();
        assert_eq!(read_lenient::<u32>(&path), Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("table.json");

        let err = write(&path, &[1u32]).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
