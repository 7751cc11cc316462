mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use zonemeet_core::Scheduler;
use zonemeet_core::config::ZonemeetConfig;

#[derive(Parser)]
#[command(name = "zonemeet")]
#[command(about = "Schedule events across timezones and inspect their change history")]
struct Cli {
    /// Override the data directory from config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile
    AddProfile {
        /// Display name
        name: String,

        /// Home timezone (IANA id, e.g. "America/New_York")
        #[arg(short, long, default_value = "UTC")]
        timezone: String,
    },
    /// List profiles sorted by name
    Profiles,
    /// Update a profile's name or timezone
    EditProfile {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        timezone: Option<String>,
    },
    /// Create an event
    New {
        /// Event title (defaults to "Event")
        #[arg(long)]
        title: Option<String>,

        /// Participant profile id (repeat for several)
        #[arg(short, long = "participant", required = true)]
        participants: Vec<String>,

        /// Canonical event timezone (IANA id)
        #[arg(short = 'z', long)]
        timezone: String,

        /// Start as local wall-clock time, e.g. "2025-10-15T09:00"
        #[arg(short, long)]
        start: String,

        /// End as local wall-clock time
        #[arg(short, long)]
        end: String,
    },
    /// Update an event; a supplied timezone applies before any local times
    Edit {
        event_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short = 'z', long)]
        timezone: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// Replacement participant list (repeat for several)
        #[arg(short, long = "participant")]
        participants: Vec<String>,

        /// Profile id to attribute this change to
        #[arg(long)]
        by: Option<String>,
    },
    /// List a profile's events, localized to a viewing timezone
    Agenda {
        profile_id: String,

        /// Viewing timezone (defaults to the profile's own)
        #[arg(long)]
        tz: Option<String>,
    },
    /// Show an event's change history
    Logs {
        event_id: String,

        /// Viewing timezone (defaults to UTC)
        #[arg(long)]
        tz: Option<String>,
    },
    /// Load sample profiles and one event into the data directory
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ZonemeetConfig::load()?.data_path(),
    };
    let scheduler = Scheduler::open(&data_dir)?;

    match cli.command {
        Commands::AddProfile { name, timezone } => {
            commands::profiles::add(&scheduler, &name, &timezone)
        }
        Commands::Profiles => commands::profiles::list(&scheduler),
        Commands::EditProfile { id, name, timezone } => {
            commands::profiles::edit(&scheduler, &id, name.as_deref(), timezone.as_deref())
        }
        Commands::New {
            title,
            participants,
            timezone,
            start,
            end,
        } => commands::events::new(&scheduler, title, participants, timezone, start, end),
        Commands::Edit {
            event_id,
            title,
            timezone,
            start,
            end,
            participants,
            by,
        } => commands::events::edit(
            &scheduler,
            &event_id,
            title,
            timezone,
            start,
            end,
            participants,
            by,
        ),
        Commands::Agenda { profile_id, tz } => {
            commands::events::agenda(&scheduler, &profile_id, tz.as_deref())
        }
        Commands::Logs { event_id, tz } => {
            commands::events::logs(&scheduler, &event_id, tz.as_deref())
        }
        Commands::Seed => commands::seed::run(&scheduler),
    }
}
