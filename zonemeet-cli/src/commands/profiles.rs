//! Profile commands.

use anyhow::Result;
use zonemeet_core::Scheduler;

pub fn add(scheduler: &Scheduler, name: &str, timezone: &str) -> Result<()> {
    let profile = scheduler.create_profile(name, Some(timezone))?;
    println!("Created profile {} ({})", profile.name, profile.id);
    println!("  timezone: {}", profile.timezone);
    Ok(())
}

pub fn list(scheduler: &Scheduler) -> Result<()> {
    let profiles = scheduler.list_profiles()?;

    if profiles.is_empty() {
        println!("No profiles yet. Create one with `zonemeet add-profile <name>`.");
        return Ok(());
    }

    for profile in profiles {
        println!("{}  {}  ({})", profile.id, profile.name, profile.timezone);
    }
    Ok(())
}

pub fn edit(
    scheduler: &Scheduler,
    id: &str,
    name: Option<&str>,
    timezone: Option<&str>,
) -> Result<()> {
    let profile = scheduler.update_profile(id, name, timezone)?;
    println!("Updated {}: {} ({})", profile.id, profile.name, profile.timezone);
    Ok(())
}
