use std::{
    io::{Error as IoError, ErrorKind},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use thiserror::Error;
use types::StatusRecord;

const TEMPORARY_FILE_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize validator statuses")]
    Serialize { source: serde_json::Error },
    #[error("failed to persist validator statuses to {path:?}")]
    Persist { path: PathBuf, source: IoError },
}

/// JSON file holding the last observed status of every tracked validator.
///
/// Reads never fail. A missing or unreadable file is treated as an empty record.
/// Writes replace the file through a rename, so readers see either the old or the new content.
#[derive(Clone, Debug)]
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn load(&self) -> StatusRecord {
        let bytes = match fs_err::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no validator statuses stored at {:?} yet", self.path);
                return StatusRecord::new();
            }
            Err(error) => {
                warn!("failed to read validator statuses, starting with none: {error}");
                return StatusRecord::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(error) => {
                warn!(
                    "validator statuses in {:?} are corrupt, starting with none: {error}",
                    self.path,
                );

                StatusRecord::new()
            }
        }
    }

    pub fn save(&self, record: &StatusRecord) -> Result<(), Error> {
        let mut string = serde_json::to_string_pretty(record)
            .map_err(|source| Error::Serialize { source })?;

        string.push('\n');

        let temporary_path = self.temporary_path();

        self.write_then_rename(&temporary_path, string)
            .map_err(|source| Error::Persist {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "stored {} validator statuses in {:?}",
            record.len(),
            self.path,
        );

        Ok(())
    }

    pub fn clear(&self) -> Result<(), Error> {
        self.save(&StatusRecord::new())
    }

    // `statuses.json` is written through `statuses.json.tmp`.
    // Appending keeps the two paths distinct even if the store file itself ends in `.tmp`.
    fn temporary_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(TEMPORARY_FILE_SUFFIX);
        path.into()
    }

    fn write_then_rename(&self, temporary_path: &Path, contents: String) -> Result<(), IoError> {
        if let Some(directory) = self.path.parent() {
            if !directory.as_os_str().is_empty() {
                fs_err::create_dir_all(directory)?;
            }
        }

        fs_err::write(temporary_path, contents)?;
        fs_err::rename(temporary_path, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::TempDir;
    use types::{ValidatorKey, ValidatorStatus};

    use super::*;

    const KEY_1: &str = "0x93247f2209abcacf57b75a51dafae777f9dd38bc7053d1af526f220a7489a6d3a2753e5f3e8b1cfe39b56f43611df74a";
    const KEY_2: &str = "0xb301803f8b5ac4a1133581fc676dfedc60d891dd5fa99028805e5ea5b08d3491af75d0707adab3b70c6a6a580217bf81";

    fn store_in(directory: &TempDir) -> StatusStore {
        StatusStore::new(directory.path().join("validator_statuses.json"))
    }

    fn sample_record() -> Result<StatusRecord> {
        Ok(StatusRecord::from([
            (KEY_1.parse::<ValidatorKey>()?, ValidatorStatus::PendingQueued),
            (KEY_2.parse::<ValidatorKey>()?, ValidatorStatus::ActiveOngoing),
        ]))
    }

    #[test]
    fn load_returns_empty_record_when_file_is_missing() -> Result<()> {
        let directory = TempDir::new()?;

        assert_eq!(store_in(&directory).load(), StatusRecord::new());

        Ok(())
    }

    #[test]
    fn load_returns_empty_record_when_file_is_corrupt() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);

        fs_err::write(store.path(), "{ not json")?;

        assert_eq!(store.load(), StatusRecord::new());

        Ok(())
    }

    #[test]
    fn load_returns_empty_record_when_status_is_unknown() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);

        fs_err::write(store.path(), format!(r#"{{"{KEY_1}": "active"}}"#))?;

        assert_eq!(store.load(), StatusRecord::new());

        Ok(())
    }

    #[test]
    fn save_then_load_returns_equal_record() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);
        let record = sample_record()?;

        store.save(&record)?;

        assert_eq!(store.load(), record);

        Ok(())
    }

    #[test]
    fn saving_loaded_record_leaves_file_unchanged() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);

        store.save(&sample_record()?)?;

        let before = fs_err::read_to_string(store.path())?;

        store.save(&store.load())?;

        assert_eq!(fs_err::read_to_string(store.path())?, before);

        Ok(())
    }

    #[test]
    fn save_writes_lowercase_keys_and_snake_case_statuses() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);

        store.save(&sample_record()?)?;

        let json = serde_json::from_str::<serde_json::Value>(&fs_err::read_to_string(store.path())?)?;

        assert_eq!(
            json,
            serde_json::json!({
                KEY_1: "pending_queued",
                KEY_2: "active_ongoing",
            }),
        );

        Ok(())
    }

    #[test]
    fn save_creates_missing_directories_and_leaves_no_temporary_file() -> Result<()> {
        let directory = TempDir::new()?;
        let store = StatusStore::new(directory.path().join("mainnet").join("statuses.json"));

        store.save(&sample_record()?)?;

        assert!(store.path().exists());
        assert!(!store.temporary_path().exists());

        Ok(())
    }

    #[test]
    fn save_replaces_store_file_ending_in_tmp_through_separate_file() -> Result<()> {
        let directory = TempDir::new()?;
        let store = StatusStore::new(directory.path().join("statuses.tmp"));

        store.save(&sample_record()?)?;

        let before = fs_err::read_to_string(store.path())?;

        assert_ne!(store.temporary_path(), store.path());
        assert_eq!(
            store.temporary_path(),
            directory.path().join("statuses.tmp.tmp"),
        );

        fs_err::create_dir_all(store.temporary_path().join("nested"))?;

        assert!(matches!(
            store.save(&StatusRecord::new()),
            Err(Error::Persist { .. }),
        ));
        assert_eq!(fs_err::read_to_string(store.path())?, before);

        Ok(())
    }

    #[test]
    fn clear_persists_empty_object() -> Result<()> {
        let directory = TempDir::new()?;
        let store = store_in(&directory);

        store.save(&sample_record()?)?;
        store.clear()?;

        assert_eq!(fs_err::read_to_string(store.path())?, "{}\n");
        assert_eq!(store.load(), StatusRecord::new());

        Ok(())
    }

    #[test]
    fn save_fails_when_path_is_a_directory() -> Result<()> {
        let directory = TempDir::new()?;
        let occupied = directory.path().join("occupied");

        fs_err::create_dir_all(occupied.join("nested"))?;

        let store = StatusStore::new(&occupied);

        let error = store
            .save(&StatusRecord::new())
            .expect_err("saving over a directory should fail");

        assert!(matches!(error, Error::Persist { .. }));
        assert_eq!(
            error.to_string(),
            format!("failed to persist validator statuses to {occupied:?}"),
        );

        Ok(())
    }
}
