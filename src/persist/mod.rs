//! Persistence of the current state.
//!
//! The engine treats storage as an injected collaborator behind
//! [`StateStore`]. Two implementations ship with the crate: an in-memory
//! store and a file store with atomic replacement. Both write a versioned
//! [`StateRecord`] in JSON or binary form, so every variant and its dates
//! round-trip exactly.

use crate::core::UserState;

pub mod error;
pub mod file;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use file::FileStateStore;
pub use memory::MemoryStateStore;
pub use record::{Format, StateRecord, STATE_RECORD_VERSION};

/// Durable home of the current [`UserState`].
///
/// `get` on an empty store yields [`UserState::Default`]. A failed `set`
/// must leave the previously stored value untouched.
pub trait StateStore: Send + Sync {
    fn get(&self) -> Result<UserState, StoreError>;

    fn set(&self, state: &UserState) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}
