//! In-process state store.

use crate::core::UserState;
use crate::persist::error::StoreError;
use crate::persist::record::{Format, StateRecord};
use crate::persist::StateStore;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

/// Keeps the encoded record in memory.
///
/// The state goes through the same encoding as the file store, so a value
/// read back is always what a durable store would return.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    format: Format,
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryStateStore {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            bytes: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self) -> Result<UserState, StoreError> {
        match self.slot().as_deref() {
            Some(bytes) => Ok(StateRecord::decode(bytes, self.format)?.state),
            None => Ok(UserState::Default),
        }
    }

    fn set(&self, state: &UserState) -> Result<(), StoreError> {
        let bytes = StateRecord::new(state.clone(), Utc::now()).encode(self.format)?;
        *self.slot() = Some(bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}
