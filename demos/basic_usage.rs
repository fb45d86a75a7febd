//! Basic Usage
//!
//! This example walks one resident through the health states.
//!
//! Key concepts:
//! - Self-diagnosis starts a symptomatic isolation with a check-in reminder
//! - A contact alert never overrides a symptomatic isolation
//! - An empty check-in ends the isolation and posts a recovery to the inbox
//! - An exposure expires once its window has closed
//!
//! Run with: cargo run --example basic_usage

use chrono::{Days, NaiveDate, TimeZone, Utc};
use resident_status::core::{Symptom, Symptoms, TestInfo, TestResult};
use resident_status::persist::{Format, MemoryStateStore};
use resident_status::storage::{
    Clock, FixedClock, MemoryInbox, MemoryReminders, TransitionOutcome, UserStateStorage,
};
use resident_status::transitions::UserStateTransitions;

fn report(step: &str, outcome: &TransitionOutcome) {
    let record = &outcome.record;
    println!(
        "  {:<28} {} -> {}{}",
        step,
        record.from.name(),
        record.to.name(),
        if record.changed() { "" } else { " (unchanged)" }
    );
    for failure in &outcome.side_effect_failures {
        println!("    side effect failed: {}", failure);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Resident Status Basic Usage ===\n");

    let onset = NaiveDate::from_ymd_opt(2020, 4, 1).ok_or("invalid date")?;
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2020, 4, 1, 12, 0, 0).unwrap());
    let storage = UserStateStorage::with_clock(
        UserStateTransitions::default(),
        MemoryStateStore::new(Format::Json),
        MemoryReminders::new(),
        MemoryInbox::new(),
        clock,
    );
    let policy = *storage.transitions().policy();

    println!("Symptomatic isolation");
    println!("----------------------------------------");
    let symptoms: Symptoms = [Symptom::Temperature, Symptom::Cough].into_iter().collect();
    println!(
        "  Main symptoms reported: {}",
        storage.has_any_of_main_symptoms(&symptoms)
    );
    report("diagnose", &storage.diagnose(onset, &symptoms)?);

    let state = storage.state()?;
    println!("  Isolating until: {:?}", state.isolation_until(&policy));
    println!("  Check-in reminder: {:?}", storage.reminders().pending());

    let outcome = storage.transition_on_contact_alert(onset + Days::new(2), |state| {
        println!("  alert changed state to {}", state.name());
    })?;
    report("contact alert", &outcome);

    let reminder = storage.reminders().pending().ok_or("no reminder scheduled")?;
    storage.clock().set(reminder);
    let cough: Symptoms = [Symptom::Cough].into_iter().collect();
    report("check-in, still coughing", &storage.diagnose_check_in(&cough)?);
    println!("  Next reminder: {:?}", storage.reminders().pending());

    let next = storage.reminders().pending().ok_or("no reminder scheduled")?;
    storage.clock().set(next);
    report("check-in, no symptoms", &storage.diagnose_check_in(&Symptoms::new())?);
    println!("  Inbox: {:?}\n", storage.inbox().items());

    println!("Exposure isolation");
    println!("----------------------------------------");
    let exposure_date = onset + Days::new(10);
    report(
        "contact alert",
        &storage.transition_on_contact_alert_silently(exposure_date)?,
    );
    report(
        "older contact alert",
        &storage.transition_on_contact_alert_silently(exposure_date - Days::new(3))?,
    );

    let negative = TestInfo::new(TestResult::Negative, storage.clock().now());
    report("negative test", &storage.transition_on_test_result(&negative)?);

    let end = storage
        .state()?
        .isolation_end(&policy)
        .ok_or("exposure without an end date")?;
    storage
        .clock()
        .set(policy.at_reminder_hour(end + Days::new(1)));
    report("expiry tick", &storage.transition_on_expired_exposed_state()?);
    report("expiry tick again", &storage.transition_on_expired_exposed_state()?);
    println!("  Inbox: {:?}", storage.inbox().items());

    println!("\nKey Takeaways:");
    println!("- Transitions are pure; storage persists before any side effect");
    println!("- Stale alerts and repeated ticks leave the state untouched");
    println!("- Recovery reaches the inbox once, test results always do");

    println!("\n=== Example Complete ===");
    Ok(())
}
