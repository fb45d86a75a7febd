//! Orchestration around the pure transition engine.
//!
//! [`UserStateStorage`] is the only component callers talk to. Each
//! operation runs load → transition → persist → side effects as one
//! critical section, so a periodic expiry tick can never overwrite the
//! result of a concurrently processed contact alert with a stale base.
//!
//! Persistence always happens first. Reminder and inbox failures are logged
//! and returned on [`TransitionOutcome::side_effect_failures`]; they never
//! undo the state change.

mod collaborators;
mod error;

pub use collaborators::{
    Clock, CollaboratorError, FixedClock, Inbox, InboxItem, MemoryInbox, MemoryReminders,
    Reminders, SystemClock,
};
pub use error::SideEffectError;

use crate::core::{
    has_any_of_main_symptoms, Symptoms, TestInfo, TransitionRecord, Trigger, UserState,
};
use crate::persist::{StateStore, StoreError};
use crate::transitions::UserStateTransitions;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Result of one orchestrated operation.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionOutcome {
    pub record: TransitionRecord,
    pub side_effect_failures: Vec<SideEffectError>,
}

impl TransitionOutcome {
    /// State after the operation.
    pub fn state(&self) -> &UserState {
        &self.record.to
    }

    pub fn changed(&self) -> bool {
        self.record.changed()
    }

    /// Whether every side effect went through.
    pub fn is_clean(&self) -> bool {
        self.side_effect_failures.is_empty()
    }

    fn fail(&mut self, error: SideEffectError) {
        warn!(
            trigger = self.record.trigger.name(),
            state = self.record.to.name(),
            error = %error,
            "side effect failed after state was persisted"
        );
        self.side_effect_failures.push(error);
    }
}

/// Stateful front of the engine: persists the current state and drives
/// reminders and the inbox.
pub struct UserStateStorage<S, R, I, C = SystemClock> {
    transitions: UserStateTransitions,
    store: S,
    reminders: R,
    inbox: I,
    clock: C,
    lock: Mutex<()>,
}

impl<S, R, I> UserStateStorage<S, R, I, SystemClock>
where
    S: StateStore,
    R: Reminders,
    I: Inbox,
{
    pub fn new(transitions: UserStateTransitions, store: S, reminders: R, inbox: I) -> Self {
        Self::with_clock(transitions, store, reminders, inbox, SystemClock)
    }
}

impl<S, R, I, C> UserStateStorage<S, R, I, C>
where
    S: StateStore,
    R: Reminders,
    I: Inbox,
    C: Clock,
{
    pub fn with_clock(
        transitions: UserStateTransitions,
        store: S,
        reminders: R,
        inbox: I,
        clock: C,
    ) -> Self {
        Self {
            transitions,
            store,
            reminders,
            inbox,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn transitions(&self) -> &UserStateTransitions {
        &self.transitions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reminders(&self) -> &R {
        &self.reminders
    }

    pub fn inbox(&self) -> &I {
        &self.inbox
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current persisted state.
    pub fn state(&self) -> Result<UserState, StoreError> {
        self.store.get()
    }

    /// Forget the persisted state and any pending check-in reminder. Only for
    /// a full app reset.
    ///
    /// A failed cancellation does not undo the reset; it is returned like the
    /// side-effect failures of a transition.
    pub fn reset(&self) -> Result<Vec<SideEffectError>, StoreError> {
        let _guard = self.lock();
        info!("resetting user state");
        self.store.clear()?;

        let mut failures = Vec::new();
        if let Err(e) = self.reminders.cancel_check_in() {
            let error = SideEffectError::ReminderCancelFailed(e.0);
            warn!(error = %error, "side effect failed after state was cleared");
            failures.push(error);
        }
        Ok(failures)
    }

    /// Apply an initiating self-diagnosis.
    pub fn diagnose(
        &self,
        symptoms_date: NaiveDate,
        symptoms: &Symptoms,
    ) -> Result<TransitionOutcome, StoreError> {
        let _guard = self.lock();
        self.apply(Trigger::Diagnosis, |engine, current, _| {
            engine.diagnose(current, symptoms_date, symptoms)
        })
    }

    /// Apply a check-in answer.
    pub fn diagnose_check_in(&self, symptoms: &Symptoms) -> Result<TransitionOutcome, StoreError> {
        let _guard = self.lock();
        self.apply(Trigger::CheckIn, |engine, current, _| {
            engine.diagnose_for_checkin(current, symptoms)
        })
    }

    /// Periodic tick releasing an exposure isolation once it has run out.
    pub fn transition_on_expired_exposed_state(&self) -> Result<TransitionOutcome, StoreError> {
        let _guard = self.lock();
        self.apply(Trigger::ExposureExpiry, |engine, current, now| {
            engine.transition_on_expired_exposed_state(current, now)
        })
    }

    /// Apply a contact alert.
    ///
    /// `on_changed` runs only when the alert actually moved the state, after
    /// the critical section has been left.
    pub fn transition_on_contact_alert<F>(
        &self,
        exposure_date: NaiveDate,
        on_changed: F,
    ) -> Result<TransitionOutcome, StoreError>
    where
        F: FnOnce(&UserState),
    {
        let outcome = {
            let _guard = self.lock();
            self.apply(Trigger::ContactAlert, |engine, current, _| {
                engine.transition_on_contact_alert(current, exposure_date)
            })?
        };

        if outcome.changed() {
            on_changed(outcome.state());
        }
        Ok(outcome)
    }

    /// Apply a contact alert when nobody needs to hear about the change.
    pub fn transition_on_contact_alert_silently(
        &self,
        exposure_date: NaiveDate,
    ) -> Result<TransitionOutcome, StoreError> {
        self.transition_on_contact_alert(exposure_date, |_| {})
    }

    /// Merge a lab result. The result always lands in the inbox.
    pub fn transition_on_test_result(
        &self,
        test_info: &TestInfo,
    ) -> Result<TransitionOutcome, StoreError> {
        let _guard = self.lock();
        let mut outcome = self.apply(Trigger::TestResult, |engine, current, _| {
            engine.transition_on_test_result(current, test_info)
        })?;

        if let Err(e) = self.inbox.add_test_info(test_info) {
            outcome.fail(SideEffectError::InboxWriteFailed(e.0));
        }
        Ok(outcome)
    }

    /// Whether the symptoms warrant isolation guidance.
    pub fn has_any_of_main_symptoms(&self, symptoms: &Symptoms) -> bool {
        has_any_of_main_symptoms(symptoms)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load, transition, persist, then run the shared side effects.
    /// Caller must hold the lock.
    fn apply<F>(&self, trigger: Trigger, next: F) -> Result<TransitionOutcome, StoreError>
    where
        F: FnOnce(&UserStateTransitions, &UserState, DateTime<Utc>) -> UserState,
    {
        let now = self.clock.now();
        let from = self.store.get()?;
        let to = next(&self.transitions, &from, now);

        let mut outcome = TransitionOutcome {
            record: TransitionRecord {
                from,
                to,
                trigger,
                timestamp: now,
            },
            side_effect_failures: Vec::new(),
        };
        let record = &outcome.record;

        debug!(
            trigger = trigger.name(),
            from = record.from.name(),
            to = record.to.name(),
            "computed transition"
        );

        // Duplicate or stale alerts leave no trace at all.
        if trigger == Trigger::ContactAlert && !record.changed() {
            return Ok(outcome);
        }

        self.store.set(&record.to)?;

        if record.changed() {
            info!(
                trigger = trigger.name(),
                from = record.from.name(),
                to = record.to.name(),
                "user state changed"
            );
        }

        let reminder = record
            .to
            .check_in_reminder(self.transitions.policy(), now);
        let had_reminder = record.from.needs_check_in_reminder();
        // Ticks and unchanged results keep whatever reminder is pending; only
        // a new state or a symptom answer moves it.
        let reschedule =
            record.changed() || matches!(trigger, Trigger::Diagnosis | Trigger::CheckIn);
        let recovered =
            matches!(trigger, Trigger::Diagnosis | Trigger::CheckIn) && record.is_recovery();

        match reminder {
            Some(at) if reschedule => {
                if let Err(e) = self.reminders.schedule_check_in(at) {
                    outcome.fail(SideEffectError::ReminderScheduleFailed(e.0));
                }
            }
            Some(_) => {}
            None if had_reminder => {
                if let Err(e) = self.reminders.cancel_check_in() {
                    outcome.fail(SideEffectError::ReminderCancelFailed(e.0));
                }
            }
            None => {}
        }

        if recovered {
            if let Err(e) = self.inbox.add_recovery() {
                outcome.fail(SideEffectError::InboxWriteFailed(e.0));
            }
        }

        Ok(outcome)
    }
}
