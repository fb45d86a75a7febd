//! Non-fatal side-effect failures.

use thiserror::Error;

/// A side effect that failed after the new state was persisted.
///
/// These never roll back a transition; callers may retry them against the
/// already-updated state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SideEffectError {
    #[error("Scheduling check-in reminder failed: {0}")]
    ReminderScheduleFailed(String),

    #[error("Cancelling check-in reminder failed: {0}")]
    ReminderCancelFailed(String),

    #[error("Writing to inbox failed: {0}")]
    InboxWriteFailed(String),
}
