//! Incoming events that can move the health state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Proximity-exposure alert, carrying the date of closest contact.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExposureEvent {
    pub exposure_date: NaiveDate,
}

/// Outcome of a laboratory test.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestResult {
    Positive,
    Negative,
    Void,
}

/// A laboratory test result as delivered to the resident.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TestInfo {
    pub result: TestResult,
    pub date: DateTime<Utc>,
}

impl TestInfo {
    pub fn new(result: TestResult, date: DateTime<Utc>) -> Self {
        Self { result, date }
    }

    /// Calendar date an isolation window anchored on this result starts from.
    pub fn result_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// What caused a transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Trigger {
    Diagnosis,
    CheckIn,
    ExposureExpiry,
    ContactAlert,
    TestResult,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Diagnosis => "diagnosis",
            Self::CheckIn => "check-in",
            Self::ExposureExpiry => "exposure-expiry",
            Self::ContactAlert => "contact-alert",
            Self::TestResult => "test-result",
        }
    }
}
