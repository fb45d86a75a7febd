//! Side-effect collaborators injected into [`UserStateStorage`].
//!
//! [`UserStateStorage`]: crate::storage::UserStateStorage

use crate::core::TestInfo;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Failure reported by a reminder scheduler or inbox.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// Source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that can be moved by hand.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *lock(&self.now) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

/// Schedules check-in reminders. At-least-once delivery is acceptable.
pub trait Reminders: Send + Sync {
    fn schedule_check_in(&self, at: DateTime<Utc>) -> Result<(), CollaboratorError>;

    fn cancel_check_in(&self) -> Result<(), CollaboratorError>;
}

/// Append-only log of user-visible news.
pub trait Inbox: Send + Sync {
    fn add_recovery(&self) -> Result<(), CollaboratorError>;

    fn add_test_info(&self, info: &TestInfo) -> Result<(), CollaboratorError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboxItem {
    Recovery,
    TestResult(TestInfo),
}

/// Inbox kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryInbox {
    items: Mutex<Vec<InboxItem>>,
}

impl MemoryInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<InboxItem> {
        lock(&self.items).clone()
    }

    pub fn recoveries(&self) -> usize {
        lock(&self.items)
            .iter()
            .filter(|item| matches!(item, InboxItem::Recovery))
            .count()
    }
}

impl Inbox for MemoryInbox {
    fn add_recovery(&self) -> Result<(), CollaboratorError> {
        lock(&self.items).push(InboxItem::Recovery);
        Ok(())
    }

    fn add_test_info(&self, info: &TestInfo) -> Result<(), CollaboratorError> {
        lock(&self.items).push(InboxItem::TestResult(*info));
        Ok(())
    }
}

/// Remembers the single pending check-in reminder.
#[derive(Debug, Default)]
pub struct MemoryReminders {
    pending: Mutex<Option<DateTime<Utc>>>,
    scheduled: Mutex<Vec<DateTime<Utc>>>,
}

impl MemoryReminders {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reminder that would fire next, if any.
    pub fn pending(&self) -> Option<DateTime<Utc>> {
        *lock(&self.pending)
    }

    /// Every schedule request received, oldest first.
    pub fn scheduled(&self) -> Vec<DateTime<Utc>> {
        lock(&self.scheduled).clone()
    }
}

impl Reminders for MemoryReminders {
    fn schedule_check_in(&self, at: DateTime<Utc>) -> Result<(), CollaboratorError> {
        *lock(&self.pending) = Some(at);
        lock(&self.scheduled).push(at);
        Ok(())
    }

    fn cancel_check_in(&self) -> Result<(), CollaboratorError> {
        *lock(&self.pending) = None;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TestResult;
    use chrono::TimeZone;

    #[test]
    fn inbox_keeps_insertion_order() {
        let inbox = MemoryInbox::new();
        let info = TestInfo::new(TestResult::Negative, Utc::now());

        inbox.add_test_info(&info).unwrap();
        inbox.add_recovery().unwrap();

        assert_eq!(
            inbox.items(),
            vec![InboxItem::TestResult(info), InboxItem::Recovery]
        );
        assert_eq!(inbox.recoveries(), 1);
    }

    #[test]
    fn cancel_clears_pending_reminder() {
        let reminders = MemoryReminders::new();
        let at = Utc.with_ymd_and_hms(2020, 4, 8, 7, 0, 0).unwrap();

        reminders.schedule_check_in(at).unwrap();
        assert_eq!(reminders.pending(), Some(at));

        reminders.cancel_check_in().unwrap();
        assert_eq!(reminders.pending(), None);
        assert_eq!(reminders.scheduled(), vec![at]);
    }

    #[test]
    fn fixed_clock_moves_when_set() {
        let start = Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2020, 4, 2, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);

        assert_eq!(clock.now(), start);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
