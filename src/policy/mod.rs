//! Isolation policy configuration.
//!
//! Durations are configuration, not state: a stored [`UserState`] only keeps
//! its anchor date, and every window end is derived from the active policy.
//!
//! Building a policy uses Stillwater's `Validation` so that every problem is
//! reported in one pass instead of failing at the first.
//!
//! # Example
//!
//! ```rust
//! use resident_status::policy::IsolationPolicyBuilder;
//!
//! let policy = IsolationPolicyBuilder::new()
//!     .symptomatic_days(7)
//!     .exposed_days(14)
//!     .reminder_hour(7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(policy.exposed_days(), 14);
//! ```
//!
//! [`UserState`]: crate::core::UserState

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::IsolationPolicyBuilder;
pub use rules::IsolationPolicy;
pub use violations::{PolicyError, PolicyViolation};
