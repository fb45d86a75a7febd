//! Builder API for creating isolation policies.

use crate::policy::rules::IsolationPolicy;
use crate::policy::violations::PolicyError;

/// Builder for creating isolation policies
pub struct IsolationPolicyBuilder {
    policy: IsolationPolicy,
}

impl IsolationPolicyBuilder {
    /// Start from the default durations.
    pub fn new() -> Self {
        Self {
            policy: IsolationPolicy::default(),
        }
    }

    /// Set symptomatic isolation length in days
    pub fn symptomatic_days(mut self, days: u32) -> Self {
        self.policy.symptomatic_days = days;
        self
    }

    /// Set exposure isolation length in days
    pub fn exposed_days(mut self, days: u32) -> Self {
        self.policy.exposed_days = days;
        self
    }

    /// Set the UTC hour at which windows end and reminders fire
    pub fn reminder_hour(mut self, hour: u32) -> Self {
        self.policy.reminder_hour = hour;
        self
    }

    /// Build the policy, reporting every violation at once.
    pub fn build(self) -> Result<IsolationPolicy, PolicyError> {
        self.policy.validated()
    }
}

impl Default for IsolationPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::violations::PolicyViolation;

    #[test]
    fn builder_overrides_defaults() {
        let policy = IsolationPolicyBuilder::new()
            .symptomatic_days(10)
            .exposed_days(7)
            .reminder_hour(9)
            .build()
            .unwrap();

        assert_eq!(policy.symptomatic_days(), 10);
        assert_eq!(policy.exposed_days(), 7);
        assert_eq!(policy.reminder_hour(), 9);
    }

    #[test]
    fn builder_reports_every_violation() {
        let result = IsolationPolicyBuilder::new()
            .symptomatic_days(0)
            .reminder_hour(30)
            .build();

        match result {
            Err(PolicyError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        PolicyViolation::ZeroSymptomaticDuration,
                        PolicyViolation::ReminderHourOutOfRange { hour: 30 },
                    ]
                );
            }
            other => panic!("Expected invalid policy, got {:?}", other),
        }
    }
}
