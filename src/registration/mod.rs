//! Device registration.
//!
//! A [`Registration`] pairs the resident identifier handed out on activation
//! with the symmetric key used for later authenticated exchanges. It is
//! created once, never mutated, and only removed by a full reset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Device is already registered as {0}")]
    AlreadyRegistered(Uuid),

    #[error("Secret key must not be empty")]
    EmptySecretKey,

    #[error("Key storage unavailable: {0}")]
    Unavailable(String),
}

/// Base64-encoded symmetric key. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(encoded: impl Into<String>) -> Result<Self, RegistrationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(RegistrationError::EmptySecretKey);
        }
        Ok(Self(encoded))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    resident_id: Uuid,
    secret_key: SecretKey,
}

impl Registration {
    pub fn new(resident_id: Uuid, secret_key: SecretKey) -> Self {
        Self {
            resident_id,
            secret_key,
        }
    }

    pub fn resident_id(&self) -> Uuid {
        self.resident_id
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

/// Holds the device registration.
pub trait KeyStorage: Send + Sync {
    /// Store the registration. Fails if one is already present.
    fn store(&self, registration: Registration) -> Result<(), RegistrationError>;

    fn registration(&self) -> Result<Option<Registration>, RegistrationError>;

    /// Remove the registration as part of a full reset.
    fn clear(&self) -> Result<(), RegistrationError>;
}

#[derive(Debug, Default)]
pub struct MemoryKeyStorage {
    slot: Mutex<Option<Registration>>,
}

impl MemoryKeyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Registration>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyStorage for MemoryKeyStorage {
    fn store(&self, registration: Registration) -> Result<(), RegistrationError> {
        let mut slot = self.slot();
        if let Some(existing) = slot.as_ref() {
            return Err(RegistrationError::AlreadyRegistered(existing.resident_id));
        }
        tracing::info!(resident_id = %registration.resident_id, "device registered");
        *slot = Some(registration);
        Ok(())
    }

    fn registration(&self) -> Result<Option<Registration>, RegistrationError> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<(), RegistrationError> {
        *self.slot() = None;
        Ok(())
    }
}
