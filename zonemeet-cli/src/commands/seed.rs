//! Seed the data directory with sample profiles and one event.

use anyhow::Result;
use zonemeet_core::Scheduler;
use zonemeet_core::service::NewEvent;

pub fn run(scheduler: &Scheduler) -> Result<()> {
    let a = scheduler.create_profile("user1", Some("America/New_York"))?;
    let b = scheduler.create_profile("user2", Some("Asia/Kolkata"))?;
    scheduler.create_profile("user3", Some("Europe/London"))?;

    scheduler.create_event(NewEvent {
        title: Some("Sample Conference".to_string()),
        participant_ids: Some(vec![a.id, b.id]),
        event_timezone: Some("Asia/Kolkata".to_string()),
        start_local: Some("2025-10-15T09:00".to_string()),
        end_local: Some("2025-10-17T09:00".to_string()),
    })?;

    println!("Seeded profiles and one event.");
    Ok(())
}
