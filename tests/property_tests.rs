//! Property-based tests for the transition engine and state stores.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::{Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use resident_status::core::{Symptom, Symptoms, UserState};
use resident_status::persist::{Format, MemoryStateStore, StateStore};
use resident_status::transitions::UserStateTransitions;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

prop_compose! {
    fn arbitrary_date()(offset in 0..730u64) -> NaiveDate {
        base_date() + Days::new(offset)
    }
}

prop_compose! {
    fn arbitrary_symptom()(variant in 0..5u8) -> Symptom {
        match variant {
            0 => Symptom::Temperature,
            1 => Symptom::Cough,
            2 => Symptom::Anosmia,
            3 => Symptom::Sneeze,
            _ => Symptom::Nausea,
        }
    }
}

prop_compose! {
    fn minor_symptoms()(picks in prop::collection::vec(any::<bool>(), 0..4)) -> Symptoms {
        picks
            .into_iter()
            .map(|sneeze| if sneeze { Symptom::Sneeze } else { Symptom::Nausea })
            .collect()
    }
}

prop_compose! {
    fn qualifying_symptoms()(
        main in 0..3u8,
        rest in prop::collection::btree_set(arbitrary_symptom(), 0..5),
    ) -> Symptoms {
        let mut symptoms = rest;
        symptoms.insert(Symptom::MAIN[main as usize]);
        symptoms
    }
}

fn arbitrary_state() -> impl Strategy<Value = UserState> {
    prop_oneof![
        Just(UserState::Default),
        (prop::collection::btree_set(arbitrary_symptom(), 0..5), arbitrary_date())
            .prop_map(|(symptoms, onset)| UserState::Symptomatic { symptoms, onset }),
        arbitrary_date().prop_map(UserState::exposed),
    ]
}

proptest! {
    #[test]
    fn diagnose_without_main_symptoms_is_default(
        current in arbitrary_state(),
        date in arbitrary_date(),
        symptoms in minor_symptoms(),
    ) {
        let engine = UserStateTransitions::default();
        prop_assert_eq!(engine.diagnose(&current, date, &symptoms), UserState::Default);
    }

    #[test]
    fn diagnose_with_main_symptoms_anchors_on_supplied_date(
        current in arbitrary_state(),
        date in arbitrary_date(),
        symptoms in qualifying_symptoms(),
    ) {
        let engine = UserStateTransitions::default();
        let next = engine.diagnose(&current, date, &symptoms);

        prop_assert_eq!(next, UserState::Symptomatic { symptoms, onset: date });
    }

    #[test]
    fn transitions_are_deterministic(
        current in arbitrary_state(),
        date in arbitrary_date(),
        symptoms in prop::collection::btree_set(arbitrary_symptom(), 0..5),
    ) {
        let engine = UserStateTransitions::default();

        prop_assert_eq!(
            engine.diagnose(&current, date, &symptoms),
            engine.diagnose(&current, date, &symptoms)
        );
        prop_assert_eq!(
            engine.diagnose_for_checkin(&current, &symptoms),
            engine.diagnose_for_checkin(&current, &symptoms)
        );
        prop_assert_eq!(
            engine.transition_on_contact_alert(&current, date),
            engine.transition_on_contact_alert(&current, date)
        );
    }

    #[test]
    fn expiry_tick_is_idempotent(current in arbitrary_state(), days_later in 0..800u64) {
        let engine = UserStateTransitions::default();
        let now = Utc.from_utc_datetime(
            &(base_date() + Days::new(days_later)).and_hms_opt(12, 0, 0).unwrap(),
        );

        let once = engine.transition_on_expired_exposed_state(&current, now);
        let twice = engine.transition_on_expired_exposed_state(&once, now);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn contact_alert_never_shortens_exposure(
        first in arbitrary_date(),
        second in arbitrary_date(),
    ) {
        let engine = UserStateTransitions::default();
        let exposed = engine.transition_on_contact_alert(&UserState::Default, first);
        let next = engine.transition_on_contact_alert(&exposed, second);

        prop_assert_eq!(next, UserState::exposed(first.max(second)));
    }

    #[test]
    fn contact_alert_never_overrides_symptomatic(
        symptoms in qualifying_symptoms(),
        onset in arbitrary_date(),
        alert in arbitrary_date(),
    ) {
        let engine = UserStateTransitions::default();
        let current = UserState::Symptomatic { symptoms, onset };

        prop_assert_eq!(engine.transition_on_contact_alert(&current, alert), current);
    }

    #[test]
    fn store_roundtrip_preserves_every_state(state in arbitrary_state(), binary in any::<bool>()) {
        let format = if binary { Format::Binary } else { Format::Json };
        let store = MemoryStateStore::new(format);

        store.set(&state).unwrap();
        prop_assert_eq!(store.get().unwrap(), state);
    }
}
