//! Pure transition engine.
//!
//! Every function here takes the current [`UserState`] plus an event and
//! returns the next state. Nothing is read from or written to the outside
//! world, so the engine can be tested without any collaborators.
//!
//! Precedence when events overlap: symptomatic (self-evidence) beats a
//! positive test, which beats an exposure alert, which beats default.
//! Within one category the later date wins.

use crate::core::{has_any_of_main_symptoms, Symptoms, TestInfo, TestResult, UserState};
use crate::policy::IsolationPolicy;
use chrono::{DateTime, NaiveDate, Utc};

/// Decision engine for health-state transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserStateTransitions {
    policy: IsolationPolicy,
}

impl UserStateTransitions {
    pub fn new(policy: IsolationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IsolationPolicy {
        &self.policy
    }

    /// Apply an initiating self-diagnosis.
    ///
    /// Without a qualifying symptom the result is `Default` whatever the
    /// current state. Otherwise a fresh `Symptomatic` window starts on
    /// `symptoms_date`, replacing any exposure or earlier symptomatic window.
    pub fn diagnose(
        &self,
        _current: &UserState,
        symptoms_date: NaiveDate,
        symptoms: &Symptoms,
    ) -> UserState {
        if !has_any_of_main_symptoms(symptoms) {
            return UserState::Default;
        }

        UserState::Symptomatic {
            symptoms: symptoms.clone(),
            onset: symptoms_date,
        }
    }

    /// Fold a check-in answer back into a symptomatic state.
    ///
    /// The onset date is kept, so a check-in never restarts the window.
    pub fn diagnose_for_checkin(&self, current: &UserState, symptoms: &Symptoms) -> UserState {
        match current {
            UserState::Symptomatic { onset, .. } => {
                if symptoms.is_empty() {
                    UserState::Default
                } else {
                    UserState::Symptomatic {
                        symptoms: symptoms.clone(),
                        onset: *onset,
                    }
                }
            }
            UserState::Default | UserState::Exposed { .. } => current.clone(),
        }
    }

    /// Release an exposure isolation whose window has closed by `now`.
    pub fn transition_on_expired_exposed_state(
        &self,
        current: &UserState,
        now: DateTime<Utc>,
    ) -> UserState {
        if current.has_expired(&self.policy, now) {
            UserState::Default
        } else {
            current.clone()
        }
    }

    /// Apply a proximity-exposure alert.
    ///
    /// A stale or duplicate alert never shortens an existing exposure window.
    pub fn transition_on_contact_alert(
        &self,
        current: &UserState,
        exposure_date: NaiveDate,
    ) -> UserState {
        match current {
            UserState::Default => UserState::Exposed { exposure_date },
            UserState::Exposed {
                exposure_date: recorded,
            } if *recorded < exposure_date => UserState::Exposed { exposure_date },
            UserState::Exposed { .. } | UserState::Symptomatic { .. } => current.clone(),
        }
    }

    /// Merge a laboratory test result.
    ///
    /// Only a positive result moves the state: it starts a symptomatic
    /// isolation anchored on the result date unless the resident is
    /// already symptomatic. Negative and void results leave every state as
    /// it is.
    pub fn transition_on_test_result(&self, current: &UserState, test_info: &TestInfo) -> UserState {
        match (test_info.result, current) {
            (TestResult::Positive, UserState::Default | UserState::Exposed { .. }) => {
                UserState::Symptomatic {
                    symptoms: Symptoms::new(),
                    onset: test_info.result_date(),
                }
            }
            (TestResult::Positive, UserState::Symptomatic { .. })
            | (TestResult::Negative | TestResult::Void, _) => current.clone(),
        }
    }
}
