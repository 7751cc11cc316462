//! Operation surface: profile and event orchestration.

mod events;
mod profiles;

pub use events::{
    EventPatch, LocalizedEvent, MERGE_ORDER, NewEvent, ProfileAgenda, ProfileRef, RenderedDiff,
    RenderedLogEntry, RenderedSnapshot,
};

use std::path::Path;

use crate::error::SchedResult;
use crate::store::Store;

/// Entry point for every read and mutation.
///
/// Owns the store exclusively: nothing else writes event records or change
/// log entries. Cheap to clone; all state lives in the collection files.
#[derive(Debug, Clone)]
pub struct Scheduler {
    store: Store,
}

impl Scheduler {
    pub fn new(store: Store) -> Self {
        Scheduler { store }
    }

    /// Open a scheduler over the collections under `data_dir`.
    pub fn open(data_dir: &Path) -> SchedResult<Self> {
        Ok(Scheduler {
            store: Store::open(data_dir)?,
        })
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }
}
