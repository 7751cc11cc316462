//! Event commands.

use anyhow::Result;
use zonemeet_core::Scheduler;
use zonemeet_core::service::{EventPatch, NewEvent};

pub fn new(
    scheduler: &Scheduler,
    title: Option<String>,
    participants: Vec<String>,
    timezone: String,
    start: String,
    end: String,
) -> Result<()> {
    let event = scheduler.create_event(NewEvent {
        title,
        participant_ids: Some(participants),
        event_timezone: Some(timezone),
        start_local: Some(start),
        end_local: Some(end),
    })?;

    println!("Created event {} ({})", event.title, event.id);
    println!("  {} — {} ({})", event.start_utc, event.end_utc, event.event_timezone);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    scheduler: &Scheduler,
    event_id: &str,
    title: Option<String>,
    timezone: Option<String>,
    start: Option<String>,
    end: Option<String>,
    participants: Vec<String>,
    by: Option<String>,
) -> Result<()> {
    let patch = EventPatch {
        title,
        event_timezone: timezone,
        start_local: start,
        end_local: end,
        // An empty repeatable flag means "not supplied", not "clear the list"
        participant_ids: (!participants.is_empty()).then_some(participants),
    };

    let event = scheduler.update_event(event_id, by, patch)?;
    println!("Updated event {} ({})", event.title, event.id);
    println!("  {} — {} ({})", event.start_utc, event.end_utc, event.event_timezone);
    Ok(())
}

pub fn agenda(scheduler: &Scheduler, profile_id: &str, tz: Option<&str>) -> Result<()> {
    let agenda = scheduler.list_events_for_profile(profile_id, tz)?;

    println!(
        "Events for {} (viewing in {}):",
        agenda.profile.name,
        tz.unwrap_or(&agenda.profile.timezone)
    );

    if agenda.events.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for event in agenda.events {
        println!("  {} ({})", event.title, event.id);
        println!("    {} — {} ({})", event.start, event.end, event.event_timezone);
        println!("    participants: {}", event.participant_ids.join(", "));
    }
    Ok(())
}

pub fn logs(scheduler: &Scheduler, event_id: &str, tz: Option<&str>) -> Result<()> {
    let entries = scheduler.event_logs(event_id, tz)?;

    if entries.is_empty() {
        println!("No update history yet");
        return Ok(());
    }

    for entry in entries {
        match &entry.changed_by {
            Some(by) => println!("{} by {}", entry.timestamp, by.name),
            None => println!("{}", entry.timestamp),
        }

        if let Some(summary) = &entry.summary {
            println!("  {}", summary);
        }

        match &entry.diff.previous {
            Some(prev) => {
                let curr = &entry.diff.current;
                if prev.title != curr.title {
                    println!("  Title: {} → {}", prev.title, curr.title);
                }
                if prev.start != curr.start {
                    println!("  Start: {} → {}", prev.start, curr.start);
                }
                if prev.end != curr.end {
                    println!("  End: {} → {}", prev.end, curr.end);
                }
                if prev.event_timezone != curr.event_timezone {
                    println!(
                        "  Timezone: {} → {}",
                        prev.event_timezone, curr.event_timezone
                    );
                }
            }
            None => {
                let curr = &entry.diff.current;
                println!("  Created: {} — {} ({})", curr.start, curr.end, curr.event_timezone);
            }
        }
    }
    Ok(())
}
