//! File Store Restart
//!
//! This example shows the health state surviving an app restart.
//!
//! Key concepts:
//! - `FileStateStore` writes a versioned record with an atomic temp-file rename
//! - JSON records are human-readable, binary records are compact
//! - A fresh `UserStateStorage` over the same file picks up where the last one stopped
//! - A full reset removes the record and cancels the pending reminder
//!
//! Run with: cargo run --example file_store_restart

use chrono::{Days, NaiveDate};
use resident_status::core::{Symptom, Symptoms};
use resident_status::persist::{FileStateStore, Format};
use resident_status::storage::{MemoryInbox, MemoryReminders, UserStateStorage};
use resident_status::transitions::UserStateTransitions;
use std::fs;
use std::path::Path;

type FileStorage = UserStateStorage<FileStateStore, MemoryReminders, MemoryInbox>;

fn open(path: &Path, format: Format) -> FileStorage {
    UserStateStorage::new(
        UserStateTransitions::default(),
        FileStateStore::new(path, format),
        MemoryReminders::new(),
        MemoryInbox::new(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== File Store Restart Example ===\n");

    let dir = std::env::temp_dir()
        .join(format!("resident-status-demo-{}", uuid::Uuid::new_v4()));
    let path = dir.join("user_state.json");
    let onset = NaiveDate::from_ymd_opt(2020, 4, 1).ok_or("invalid date")?;

    // Run 1: diagnose, then "crash"
    println!("Run 1: Reporting symptoms");
    println!("----------------------------------------");
    {
        let storage = open(&path, Format::Json);
        println!("  Initial state: {:?}", storage.state()?);

        let symptoms: Symptoms = [Symptom::Anosmia, Symptom::Sneeze].into_iter().collect();
        let outcome = storage.diagnose(onset, &symptoms)?;
        println!("  Now: {:?}", outcome.state());
        println!("  Record on disk:\n{}\n", fs::read_to_string(&path)?);
    }

    // Run 2: a new process opens the same file
    println!("Run 2: Reopening after restart");
    println!("----------------------------------------");
    let storage = open(&path, Format::Json);
    let state = storage.state()?;
    println!("  Restored state: {:?}", state);
    println!(
        "  Isolation ends: {:?}",
        state.isolation_end(storage.transitions().policy())
    );

    let outcome = storage.transition_on_contact_alert_silently(onset + Days::new(1))?;
    println!(
        "  Contact alert while symptomatic changed state: {}",
        outcome.changed()
    );

    let failures = storage.reset()?;
    println!("  Reset, {} side effect failure(s)", failures.len());
    println!("  Record still on disk: {}", path.exists());
    println!("  State after reset: {:?}\n", storage.state()?);

    // Binary records hold the same state in fewer bytes
    println!("Binary format");
    println!("----------------------------------------");
    let binary_path = dir.join("user_state.bin");
    let binary = open(&binary_path, Format::Binary);
    binary.transition_on_contact_alert_silently(onset)?;
    println!("  Binary record: {} bytes", fs::metadata(&binary_path)?.len());
    println!("  Restored: {:?}", open(&binary_path, Format::Binary).state()?);

    // Cleanup
    fs::remove_dir_all(&dir).ok();

    println!("\nKey Takeaways:");
    println!("- The state is persisted before any reminder or inbox write");
    println!("- Atomic writes mean a crash never leaves a half-written record");
    println!("- Records carry a version so older builds refuse newer layouts");

    println!("\n=== Example Complete ===");
    Ok(())
}
