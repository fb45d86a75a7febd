//! Resident status: the health-state engine of a contact-tracing client.
//!
//! The crate follows a "pure core, imperative shell" layout. The core
//! decides the next health state from the current one plus an event and
//! has no side effects. The shell loads and persists the state and drives
//! the reminder scheduler and the inbox.
//!
//! # Core Concepts
//!
//! - **UserState**: `Default`, `Symptomatic` or `Exposed`, with per-variant data
//! - **Transitions**: Pure functions `(state, event) -> state`
//! - **Policy**: Isolation durations and reminder timing, validated up front
//! - **Storage**: Atomic load → transition → persist → notify sequence
//!
//! # Example
//!
//! ```rust
//! use resident_status::core::{Symptom, Symptoms, UserState};
//! use resident_status::persist::MemoryStateStore;
//! use resident_status::storage::{MemoryInbox, MemoryReminders, UserStateStorage};
//! use resident_status::transitions::UserStateTransitions;
//! use chrono::NaiveDate;
//!
//! let storage = UserStateStorage::new(
//!     UserStateTransitions::default(),
//!     MemoryStateStore::default(),
//!     MemoryReminders::new(),
//!     MemoryInbox::new(),
//! );
//!
//! let onset = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
//! let symptoms: Symptoms = [Symptom::Temperature].into_iter().collect();
//! storage.diagnose(onset, &symptoms).unwrap();
//!
//! assert_eq!(
//!     storage.state().unwrap(),
//!     UserState::symptomatic([Symptom::Temperature], onset)
//! );
//! ```

pub mod core;
pub mod persist;
pub mod policy;
pub mod registration;
pub mod storage;
pub mod transitions;

// Re-export commonly used types
pub use core::{Symptom, Symptoms, TestInfo, TestResult, UserState};
pub use policy::IsolationPolicy;
pub use storage::{TransitionOutcome, UserStateStorage};
pub use transitions::UserStateTransitions;
