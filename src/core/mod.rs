//! Core health-state types.
//!
//! This module contains the value types the engine works on:
//! - Symptoms and symptom reports
//! - Incoming events (exposure alerts, test results)
//! - The [`UserState`] sum type and its derived properties
//! - Transition records
//!
//! Everything here is pure data with no side effects.

mod event;
mod history;
mod state;
mod symptom;

pub use event::{ExposureEvent, TestInfo, TestResult, Trigger};
pub use history::TransitionRecord;
pub use state::UserState;
pub use symptom::{has_any_of_main_symptoms, Symptom, SymptomReport, Symptoms};
