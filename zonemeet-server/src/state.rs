use anyhow::Result;
use zonemeet_core::Scheduler;
use zonemeet_core::config::ZonemeetConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    // The scheduler holds no in-memory data; every call reads the collection
    // files, so concurrent edits to the data directory are picked up.
    scheduler: Scheduler,
}

impl AppState {
    pub fn new(config: &ZonemeetConfig) -> Result<Self> {
        Ok(AppState {
            scheduler: Scheduler::open(&config.data_path())?,
        })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
