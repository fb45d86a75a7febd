//! Self-reported symptoms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A symptom the resident can report.
///
/// Only [`Symptom::Temperature`], [`Symptom::Cough`] and [`Symptom::Anosmia`]
/// qualify for isolation. The others are recorded but never start an
/// isolation window on their own.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symptom {
    Temperature,
    Cough,
    Anosmia,
    Sneeze,
    Nausea,
}

impl Symptom {
    /// Symptoms sufficient on their own to trigger isolation.
    pub const MAIN: [Symptom; 3] = [Symptom::Temperature, Symptom::Cough, Symptom::Anosmia];

    /// Whether this symptom qualifies for isolation.
    pub fn is_main(self) -> bool {
        Self::MAIN.contains(&self)
    }
}

/// Set of symptoms, ordered so that equal sets serialize identically.
pub type Symptoms = BTreeSet<Symptom>;

/// Check whether any qualifying symptom is present.
///
/// # Example
///
/// ```rust
/// use resident_status::core::{has_any_of_main_symptoms, Symptom, Symptoms};
///
/// let sneezing: Symptoms = [Symptom::Sneeze].into_iter().collect();
/// let coughing: Symptoms = [Symptom::Sneeze, Symptom::Cough].into_iter().collect();
///
/// assert!(!has_any_of_main_symptoms(&sneezing));
/// assert!(has_any_of_main_symptoms(&coughing));
/// ```
pub fn has_any_of_main_symptoms(symptoms: &Symptoms) -> bool {
    symptoms.iter().any(|s| s.is_main())
}

/// A symptom report: what the resident feels and since when.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptoms: Symptoms,
    pub onset: NaiveDate,
}

impl SymptomReport {
    pub fn new(symptoms: impl IntoIterator<Item = Symptom>, onset: NaiveDate) -> Self {
        Self {
            symptoms: symptoms.into_iter().collect(),
            onset,
        }
    }

    /// Whether this report can start an isolation window.
    pub fn qualifies(&self) -> bool {
        has_any_of_main_symptoms(&self.symptoms)
    }
}
