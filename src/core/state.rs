//! The resident's health state.
//!
//! Exactly one [`UserState`] is current at any time. Values are immutable:
//! a transition always produces a new value, and two states are equal when
//! both their variant and payload match.

use crate::core::symptom::{Symptom, Symptoms};
use crate::policy::IsolationPolicy;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Health state of the resident.
///
/// # Example
///
/// ```rust
/// use resident_status::core::{Symptom, UserState};
/// use resident_status::policy::IsolationPolicy;
/// use chrono::NaiveDate;
///
/// let onset = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
/// let state = UserState::symptomatic([Symptom::Temperature], onset);
///
/// assert!(state.is_isolating());
/// assert_eq!(
///     state.isolation_end(&IsolationPolicy::default()),
///     NaiveDate::from_ymd_opt(2020, 4, 8)
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum UserState {
    /// No known exposure and no active symptoms.
    #[default]
    Default,

    /// Isolating because of self-reported symptoms or a positive test.
    ///
    /// A positive test while not already symptomatic lands here with an
    /// empty symptom set, anchored on the result date.
    Symptomatic { symptoms: Symptoms, onset: NaiveDate },

    /// Isolating because of a proximity-exposure alert.
    Exposed { exposure_date: NaiveDate },
}

impl UserState {
    pub fn symptomatic(
        symptoms: impl IntoIterator<Item = Symptom>,
        onset: NaiveDate,
    ) -> Self {
        Self::Symptomatic {
            symptoms: symptoms.into_iter().collect(),
            onset,
        }
    }

    pub fn exposed(exposure_date: NaiveDate) -> Self {
        Self::Exposed { exposure_date }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Symptomatic { .. } => "Symptomatic",
            Self::Exposed { .. } => "Exposed",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Whether the resident is currently advised to self-isolate.
    pub fn is_isolating(&self) -> bool {
        !self.is_default()
    }

    /// Reported symptoms, `None` unless symptomatic.
    pub fn symptoms(&self) -> Option<&Symptoms> {
        match self {
            Self::Symptomatic { symptoms, .. } => Some(symptoms),
            _ => None,
        }
    }

    /// Date the isolation window is anchored on.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Default => None,
            Self::Symptomatic { onset, .. } => Some(*onset),
            Self::Exposed { exposure_date } => Some(*exposure_date),
        }
    }

    /// Last day of the isolation window.
    pub fn isolation_end(&self, policy: &IsolationPolicy) -> Option<NaiveDate> {
        match self {
            Self::Default => None,
            Self::Symptomatic { onset, .. } => Some(policy.symptomatic_end(*onset)),
            Self::Exposed { exposure_date } => Some(policy.exposed_end(*exposure_date)),
        }
    }

    /// Instant the isolation window closes.
    pub fn isolation_until(&self, policy: &IsolationPolicy) -> Option<DateTime<Utc>> {
        self.isolation_end(policy)
            .map(|end| policy.at_reminder_hour(end))
    }

    /// Whether this state needs a check-in reminder at all.
    pub fn needs_check_in_reminder(&self) -> bool {
        matches!(self, Self::Symptomatic { .. })
    }

    /// When to remind the resident to report whether symptoms persist.
    ///
    /// The reminder fires when the window closes. Once that instant has
    /// passed (symptoms still present at a check-in), it moves to the next
    /// reminder hour after `now`.
    pub fn check_in_reminder(
        &self,
        policy: &IsolationPolicy,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        if !self.needs_check_in_reminder() {
            return None;
        }
        self.isolation_until(policy).map(|until| {
            if until > now {
                until
            } else {
                policy.next_reminder_after(now)
            }
        })
    }

    /// Whether an exposure isolation has run out at `now`.
    ///
    /// Always false for non-exposed states.
    pub fn has_expired(&self, policy: &IsolationPolicy, now: DateTime<Utc>) -> bool {
        match self {
            Self::Exposed { .. } => self.isolation_until(policy).is_some_and(|until| now >= until),
            Self::Default | Self::Symptomatic { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_state_has_no_obligations() {
        let policy = IsolationPolicy::default();
        let state = UserState::default();

        assert!(state.is_default());
        assert!(!state.is_isolating());
        assert_eq!(state.isolation_end(&policy), None);
        assert_eq!(state.check_in_reminder(&policy, Utc::now()), None);
    }

    #[test]
    fn exposed_window_closes_at_reminder_hour() {
        let policy = IsolationPolicy::default();
        let state = UserState::exposed(day(2020, 4, 10));

        assert_eq!(state.isolation_end(&policy), Some(day(2020, 4, 24)));
        assert_eq!(
            state.isolation_until(&policy),
            Some(Utc.with_ymd_and_hms(2020, 4, 24, 7, 0, 0).unwrap())
        );
        assert!(!state.needs_check_in_reminder());
    }

    #[test]
    fn exposed_expires_once_window_closes() {
        let policy = IsolationPolicy::default();
        let state = UserState::exposed(day(2020, 4, 10));

        let before = Utc.with_ymd_and_hms(2020, 4, 24, 6, 59, 59).unwrap();
        let at = Utc.with_ymd_and_hms(2020, 4, 24, 7, 0, 0).unwrap();

        assert!(!state.has_expired(&policy, before));
        assert!(state.has_expired(&policy, at));
    }

    #[test]
    fn symptomatic_never_expires_by_tick() {
        let policy = IsolationPolicy::default();
        let state = UserState::symptomatic([Symptom::Cough], day(2020, 4, 1));
        let much_later = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        assert!(!state.has_expired(&policy, much_later));
    }

    #[test]
    fn symptomatic_reminder_at_window_end() {
        let policy = IsolationPolicy::default();
        let state = UserState::symptomatic([Symptom::Temperature], day(2020, 4, 1));
        let now = Utc.with_ymd_and_hms(2020, 4, 1, 12, 0, 0).unwrap();

        assert_eq!(
            state.check_in_reminder(&policy, now),
            Some(Utc.with_ymd_and_hms(2020, 4, 8, 7, 0, 0).unwrap())
        );
    }

    #[test]
    fn overdue_reminder_moves_to_next_reminder_hour() {
        let policy = IsolationPolicy::default();
        let state = UserState::symptomatic([Symptom::Cough], day(2020, 4, 1));
        let now = Utc.with_ymd_and_hms(2020, 4, 8, 9, 30, 0).unwrap();

        assert_eq!(
            state.check_in_reminder(&policy, now),
            Some(Utc.with_ymd_and_hms(2020, 4, 9, 7, 0, 0).unwrap())
        );
    }

    #[test]
    fn equality_is_by_variant_and_payload() {
        let a = UserState::symptomatic([Symptom::Cough, Symptom::Temperature], day(2020, 4, 1));
        let b = UserState::symptomatic([Symptom::Temperature, Symptom::Cough], day(2020, 4, 1));
        let c = UserState::symptomatic([Symptom::Cough], day(2020, 4, 1));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(UserState::exposed(day(2020, 4, 1)), UserState::exposed(day(2020, 4, 2)));
    }

    #[test]
    fn state_roundtrips_through_json() {
        let states = vec![
            UserState::Default,
            UserState::symptomatic([Symptom::Anosmia, Symptom::Nausea], day(2020, 4, 1)),
            UserState::exposed(day(2020, 4, 10)),
        ];

        for state in states {
            let json = serde_json::to_string(&state).unwrap();
            let back: UserState = serde_json::from_str(&json).unwrap();
            assert_eq!(back, state);
        }
    }
}
