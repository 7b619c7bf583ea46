//! JSON snapshots of the last successful pull.
//!
//! Raw responses are persisted pretty-printed so a pull can be re-run
//! in local mode without secrets or network access.  Only the
//! round-trip matters; the byte format is incidental.

use std::fs;
use std::path::Path;

use crate::error::PullError;

/// Persist raw records at `path`, creating parent directories as needed.
pub fn write_snapshot(path: impl AsRef<Path>, records: &serde_json::Value) -> Result<(), PullError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}

/// Re-load records persisted by [`write_snapshot`].
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<serde_json::Value, PullError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::records_to_frame;
    use serde_json::json;

    #[test]
    fn round_trip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_sync/queue_snapshot.json");
        let records = json!([
            {"id": 7, "status": "Open", "user_email": "a@example.com"},
            {"id": 9, "status": "Open", "user_email": "b@example.com"},
        ]);

        write_snapshot(&path, &records).unwrap();
        let reloaded = load_snapshot(&path).unwrap();
        assert_eq!(records, reloaded);
    }

    #[test]
    fn round_trip_yields_an_equal_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let records = json!([
            {"id": 1, "subject": "cannot log in", "priority": 3},
            {"id": 2, "subject": "report export hangs", "priority": 1},
        ]);

        let direct = records_to_frame(&records).unwrap();
        write_snapshot(&path, &records).unwrap();
        let via_disk = records_to_frame(&load_snapshot(&path).unwrap()).unwrap();

        assert!(direct.equals(&via_disk));
    }

    #[test]
    fn loading_a_missing_snapshot_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PullError::Io(_)));
    }
}
