//! Versioned envelope around a persisted state.

use crate::core::UserState;
use crate::persist::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for the state record format
pub const STATE_RECORD_VERSION: u32 = 1;

/// Encoding used on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Human-readable, for debugging and support
    #[default]
    Json,
    /// Compact
    Binary,
}

/// Serializable record of the current state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Record format version
    pub version: u32,

    /// When the record was written
    pub saved_at: DateTime<Utc>,

    /// The persisted state
    pub state: UserState,
}

impl StateRecord {
    pub fn new(state: UserState, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: STATE_RECORD_VERSION,
            saved_at,
            state,
        }
    }

    pub fn encode(&self, format: Format) -> Result<Vec<u8>, StoreError> {
        match format {
            Format::Json => serde_json::to_vec(self)
                .map_err(|e| StoreError::SerializationFailed(e.to_string())),
            Format::Binary => {
                bincode::serialize(self).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            }
        }
    }

    pub fn decode(bytes: &[u8], format: Format) -> Result<Self, StoreError> {
        let record: Self = match format {
            Format::Json => serde_json::from_slice(bytes)
                .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?,
            Format::Binary => bincode::deserialize(bytes)
                .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?,
        };

        if record.version != STATE_RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: record.version,
                supported: STATE_RECORD_VERSION,
            });
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symptom;
    use chrono::NaiveDate;

    fn symptomatic() -> UserState {
        UserState::symptomatic(
            [Symptom::Temperature, Symptom::Anosmia],
            NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
        )
    }

    #[test]
    fn binary_and_json_both_preserve_state() {
        let record = StateRecord::new(symptomatic(), Utc::now());

        for format in [Format::Json, Format::Binary] {
            let bytes = record.encode(format).unwrap();
            let back = StateRecord::decode(&bytes, format).unwrap();
            assert_eq!(back, record);
        }
    }

    #[test]
    fn decode_rejects_future_version() {
        let mut record = StateRecord::new(UserState::Default, Utc::now());
        record.version = STATE_RECORD_VERSION + 1;
        let bytes = record.encode(Format::Json).unwrap();

        let result = StateRecord::decode(&bytes, Format::Json);
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn decode_reports_corrupt_bytes() {
        let result = StateRecord::decode(b"not a record", Format::Json);
        assert!(matches!(result, Err(StoreError::DeserializationFailed(_))));
    }
}
