//! Core types and services for the zonemeet ecosystem.
//!
//! Profiles each have a home timezone; events carry a canonical timezone and
//! UTC-stored bounds. Every mutation records a before/after snapshot in an
//! append-only change log that can be rendered in any viewing timezone.

pub mod cache;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod time;

pub use error::{SchedError, SchedResult};
pub use model::{ChangeLogEntry, EventDiff, EventField, EventRecord, EventSnapshot, Profile};
pub use service::Scheduler;
