//! Policy violations and errors.

use thiserror::Error;

/// A single reason an isolation policy is unusable
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Symptomatic isolation must last at least one day")]
    ZeroSymptomaticDuration,

    #[error("Exposure isolation must last at least one day")]
    ZeroExposedDuration,

    #[error("Reminder hour {hour} is not an hour of the day (0-23)")]
    ReminderHourOutOfRange { hour: u32 },
}

/// Errors raised when building or loading a policy
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Invalid isolation policy: {} violation(s)", .0.len())]
    Invalid(Vec<PolicyViolation>),

    #[error("Policy could not be parsed: {0}")]
    Parse(String),
}
