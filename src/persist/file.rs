//! File-backed state store.

use crate::core::UserState;
use crate::persist::error::StoreError;
use crate::persist::record::{Format, StateRecord};
use crate::persist::StateStore;
use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Persists the state record to a single file.
///
/// Writes go to a sibling temp file which is flushed to disk and then renamed
/// over the target, so a failed write or a crash leaves the previous record
/// intact.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
    format: Format,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl StateStore for FileStateStore {
    fn get(&self) -> Result<UserState, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(StateRecord::decode(&bytes, self.format)?.state),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(UserState::Default),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, state: &UserState) -> Result<(), StoreError> {
        let bytes = StateRecord::new(state.clone(), Utc::now()).encode(self.format)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // The record must be on disk before the rename makes it visible.
        let temp = self.temp_path();
        let mut file = fs::File::create(&temp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
