//! Records of applied transitions.

use crate::core::event::Trigger;
use crate::core::state::UserState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// Produced for every orchestrated operation, including ones that leave
/// the state unchanged.
///
/// # Example
///
/// ```rust
/// use resident_status::core::{TransitionRecord, Trigger, UserState};
/// use chrono::{NaiveDate, Utc};
///
/// let record = TransitionRecord {
///     from: UserState::Default,
///     to: UserState::exposed(NaiveDate::from_ymd_opt(2020, 4, 10).unwrap()),
///     trigger: Trigger::ContactAlert,
///     timestamp: Utc::now(),
/// };
///
/// assert!(record.changed());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the event
    pub from: UserState,
    /// State after the event
    pub to: UserState,
    /// Event that was applied
    pub trigger: Trigger,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Whether the event changed the state by value.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Whether the resident left isolation with this transition.
    pub fn is_recovery(&self) -> bool {
        !self.from.is_default() && self.to.is_default()
    }
}
