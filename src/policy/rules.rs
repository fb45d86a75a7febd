//! Isolation durations and reminder timing.

use crate::policy::violations::{PolicyError, PolicyViolation};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_SYMPTOMATIC_DAYS: u32 = 7;
pub const DEFAULT_EXPOSED_DAYS: u32 = 14;
pub const DEFAULT_REMINDER_HOUR: u32 = 7;

/// Configuration for isolation windows.
///
/// Windows are computed as anchor date + a fixed number of days. A window
/// ends at `reminder_hour` (UTC) on its end date, which is also when the
/// check-in reminder fires.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct IsolationPolicy {
    pub(crate) symptomatic_days: u32,
    pub(crate) exposed_days: u32,
    pub(crate) reminder_hour: u32,
}

impl Default for IsolationPolicy {
    fn default() -> Self {
        Self {
            symptomatic_days: DEFAULT_SYMPTOMATIC_DAYS,
            exposed_days: DEFAULT_EXPOSED_DAYS,
            reminder_hour: DEFAULT_REMINDER_HOUR,
        }
    }
}

impl IsolationPolicy {
    pub fn symptomatic_days(&self) -> u32 {
        self.symptomatic_days
    }

    pub fn exposed_days(&self) -> u32 {
        self.exposed_days
    }

    pub fn reminder_hour(&self) -> u32 {
        self.reminder_hour
    }

    /// Last day of a symptomatic isolation that started on `onset`.
    pub fn symptomatic_end(&self, onset: NaiveDate) -> NaiveDate {
        add_days(onset, self.symptomatic_days)
    }

    /// Last day of an exposure isolation for contact on `exposure_date`.
    pub fn exposed_end(&self, exposure_date: NaiveDate) -> NaiveDate {
        add_days(exposure_date, self.exposed_days)
    }

    /// The instant `date` reaches the reminder hour.
    pub fn at_reminder_hour(&self, date: NaiveDate) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.reminder_hour, 0, 0).unwrap_or_default();
        date.and_time(time).and_utc()
    }

    /// First reminder-hour instant strictly after `now`.
    pub fn next_reminder_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.at_reminder_hour(now.date_naive());
        if today > now {
            today
        } else {
            self.at_reminder_hour(add_days(now.date_naive(), 1))
        }
    }

    /// Check all rules, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<PolicyViolation>> {
        let checks = vec![
            check(
                self.symptomatic_days > 0,
                PolicyViolation::ZeroSymptomaticDuration,
            ),
            check(self.exposed_days > 0, PolicyViolation::ZeroExposedDuration),
            check(
                self.reminder_hour < 24,
                PolicyViolation::ReminderHourOutOfRange {
                    hour: self.reminder_hour,
                },
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Parse a policy from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_str(json).map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validated()
    }

    pub(crate) fn validated(self) -> Result<Self, PolicyError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(errors) => {
                Err(PolicyError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}

fn check(ok: bool, violation: PolicyViolation) -> Validation<(), NonEmptyVec<PolicyViolation>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_policy_is_valid() {
        assert!(IsolationPolicy::default().validate().is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let policy = IsolationPolicy {
            symptomatic_days: 0,
            exposed_days: 0,
            reminder_hour: 24,
        };

        match policy.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, PolicyViolation::ReminderHourOutOfRange { hour: 24 })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn windows_add_configured_days() {
        let policy = IsolationPolicy::default();

        assert_eq!(policy.symptomatic_end(day(2020, 4, 1)), day(2020, 4, 8));
        assert_eq!(policy.exposed_end(day(2020, 4, 10)), day(2020, 4, 24));
    }

    #[test]
    fn window_end_saturates_at_max_date() {
        let policy = IsolationPolicy::default();
        assert_eq!(policy.exposed_end(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn next_reminder_rolls_to_tomorrow_once_the_hour_passed() {
        let policy = IsolationPolicy::default();

        let early = Utc.with_ymd_and_hms(2020, 4, 8, 6, 0, 0).unwrap();
        assert_eq!(
            policy.next_reminder_after(early),
            Utc.with_ymd_and_hms(2020, 4, 8, 7, 0, 0).unwrap()
        );

        let late = Utc.with_ymd_and_hms(2020, 4, 8, 7, 0, 0).unwrap();
        assert_eq!(
            policy.next_reminder_after(late),
            Utc.with_ymd_and_hms(2020, 4, 9, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn from_json_rejects_invalid_policy() {
        let json = r#"{"symptomatic_days":0,"exposed_days":14,"reminder_hour":7}"#;
        let result = IsolationPolicy::from_json(json);

        assert!(matches!(result, Err(PolicyError::Invalid(v)) if v == vec![PolicyViolation::ZeroSymptomaticDuration]));
    }

    #[test]
    fn from_json_reads_valid_policy() {
        let json = r#"{"symptomatic_days":10,"exposed_days":14,"reminder_hour":9}"#;
        let policy = IsolationPolicy::from_json(json).unwrap();

        assert_eq!(policy.symptomatic_days(), 10);
        assert_eq!(policy.reminder_hour(), 9);
    }
}
