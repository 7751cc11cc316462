//! Entities for profiles, events, and the change-audit ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generate a fresh entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A person with a home timezone. Events are stored in UTC and projected
/// into the profile's zone (or any other) at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// IANA identifier, e.g. "America/New_York". Defaults to "UTC".
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A scheduled event with canonical UTC bounds and a display timezone.
///
/// `participant_ids` is an ordered sequence of profile ids. Duplicates are
/// kept as supplied and ordering is never normalized: a reorder is a visible
/// change in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub participant_ids: Vec<String>,
    pub event_timezone: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl EventRecord {
    /// Capture the five audited fields as they stand right now.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            start_utc: self.start_utc,
            end_utc: self.end_utc,
            event_timezone: self.event_timezone.clone(),
            participant_ids: self.participant_ids.clone(),
            title: self.title.clone(),
        }
    }
}

/// The audited fields of an event. Both sides of a diff carry all five
/// fields, not just the ones that changed, so projections stay exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub event_timezone: String,
    pub participant_ids: Vec<String>,
    pub title: String,
}

/// Before/after snapshot pair recorded per mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDiff {
    /// Initial snapshot; there is no "before".
    Created { current: EventSnapshot },
    /// Full snapshots from both sides of an update.
    Updated {
        previous: EventSnapshot,
        current: EventSnapshot,
    },
}

impl EventDiff {
    pub fn previous(&self) -> Option<&EventSnapshot> {
        match self {
            EventDiff::Created { .. } => None,
            EventDiff::Updated { previous, .. } => Some(previous),
        }
    }

    pub fn current(&self) -> &EventSnapshot {
        match self {
            EventDiff::Created { current } | EventDiff::Updated { current, .. } => current,
        }
    }
}

/// One entry in the append-only audit ledger of an event.
///
/// Entries are immutable once written; insertion order is authoritative and
/// is never re-sorted on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: String,
    pub event_id: String,
    /// `None` means the change was unattributed (system or anonymous).
    pub changed_by: Option<String>,
    pub timestamp_utc: DateTime<Utc>,
    pub diff: EventDiff,
}

/// The audited fields, used when reporting which of them changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    EventTimezone,
    Start,
    End,
    Participants,
    Title,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot() -> EventSnapshot {
        EventSnapshot {
            start_utc: Utc.with_ymd_and_hms(2025, 10, 15, 3, 30, 0).unwrap(),
            end_utc: Utc.with_ymd_and_hms(2025, 10, 17, 3, 30, 0).unwrap(),
            event_timezone: "Asia/Kolkata".to_string(),
            participant_ids: vec!["a".to_string(), "b".to_string()],
            title: "Sample Conference".to_string(),
        }
    }

    #[test]
    fn test_diff_sides() {
        let created = EventDiff::Created { current: snapshot() };
        assert!(created.previous().is_none());
        assert_eq!(created.current(), &snapshot());

        let updated = EventDiff::Updated {
            previous: snapshot(),
            current: snapshot(),
        };
        assert!(updated.previous().is_some());
    }

    #[test]
    fn test_diff_serializes_tagged() {
        let created = EventDiff::Created { current: snapshot() };
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["kind"], "created");
        assert!(json["current"]["start_utc"].is_string());

        let back: EventDiff = serde_json::from_value(json).unwrap();
        assert!(back.previous().is_none());
    }
}
