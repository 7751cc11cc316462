//! Pure projection of audit snapshots into change reports.
//!
//! No persistence access here: participant names come in as a caller-supplied
//! lookup table, and change flags are computed on the stored UTC values so
//! they never depend on the timezone a viewer renders in.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{EventField, EventSnapshot};

/// Participant membership difference between two snapshots, by id.
/// Each side keeps its own original ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParticipantDelta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ParticipantDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Which audited fields differ between two snapshots.
///
/// Comparison is exact value equality. Participant comparison is
/// order-sensitive: a reorder with unchanged membership still counts as a
/// change here, even though [`participant_delta`] reports nothing for it.
pub fn changed_fields(previous: &EventSnapshot, current: &EventSnapshot) -> Vec<EventField> {
    let mut changed = Vec::new();
    if previous.event_timezone != current.event_timezone {
        changed.push(EventField::EventTimezone);
    }
    if previous.start_utc != current.start_utc {
        changed.push(EventField::Start);
    }
    if previous.end_utc != current.end_utc {
        changed.push(EventField::End);
    }
    if previous.participant_ids != current.participant_ids {
        changed.push(EventField::Participants);
    }
    if previous.title != current.title {
        changed.push(EventField::Title);
    }
    changed
}

/// Membership difference by id between two participant lists.
pub fn participant_delta(previous: &[String], current: &[String]) -> ParticipantDelta {
    ParticipantDelta {
        added: current
            .iter()
            .filter(|id| !previous.contains(id))
            .cloned()
            .collect(),
        removed: previous
            .iter()
            .filter(|id| !current.contains(id))
            .cloned()
            .collect(),
    }
}

/// Human-readable participant change line: `"Removed: a, b · Added: c"`.
///
/// Empty halves are omitted; `None` when nothing changed. Ids missing from
/// the lookup (deleted profiles) render as the raw id.
pub fn summary(delta: &ParticipantDelta, names: &HashMap<String, String>) -> Option<String> {
    if delta.is_empty() {
        return None;
    }

    let resolve = |ids: &[String]| {
        ids.iter()
            .map(|id| names.get(id).cloned().unwrap_or_else(|| id.clone()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !delta.removed.is_empty() {
        parts.push(format!("Removed: {}", resolve(&delta.removed)));
    }
    if !delta.added.is_empty() {
        parts.push(format!("Added: {}", resolve(&delta.added)));
    }
    Some(parts.join(" · "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snapshot(participants: &[&str], title: &str) -> EventSnapshot {
        EventSnapshot {
            start_utc: Utc.with_ymd_and_hms(2025, 10, 15, 3, 30, 0).unwrap(),
            end_utc: Utc.with_ymd_and_hms(2025, 10, 17, 3, 30, 0).unwrap(),
            event_timezone: "Asia/Kolkata".to_string(),
            participant_ids: participants.iter().map(|s| s.to_string()).collect(),
            title: title.to_string(),
        }
    }

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_no_changes() {
        let a = snapshot(&["p1", "p2"], "Event");
        assert!(changed_fields(&a, &a.clone()).is_empty());
        assert!(participant_delta(&a.participant_ids, &a.participant_ids).is_empty());
        assert_eq!(
            summary(
                &participant_delta(&a.participant_ids, &a.participant_ids),
                &HashMap::new()
            ),
            None
        );
    }

    #[test]
    fn test_changed_fields_exact_equality() {
        let prev = snapshot(&["p1"], "Event");
        let mut curr = prev.clone();
        curr.title = "Renamed".to_string();
        curr.end_utc = Utc.with_ymd_and_hms(2025, 10, 18, 3, 30, 0).unwrap();

        assert_eq!(
            changed_fields(&prev, &curr),
            vec![EventField::End, EventField::Title]
        );
    }

    #[test]
    fn test_reorder_flags_participants_but_yields_empty_delta() {
        let prev = snapshot(&["p1", "p2"], "Event");
        let curr = snapshot(&["p2", "p1"], "Event");

        assert_eq!(changed_fields(&prev, &curr), vec![EventField::Participants]);
        assert!(participant_delta(&prev.participant_ids, &curr.participant_ids).is_empty());
    }

    #[test]
    fn test_delta_preserves_each_sides_ordering() {
        let prev = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let curr = vec!["c".to_string(), "e".to_string(), "d".to_string()];

        let delta = participant_delta(&prev, &curr);
        assert_eq!(delta.added, vec!["e", "d"]);
        assert_eq!(delta.removed, vec!["a", "b"]);
    }

    #[test]
    fn test_summary_rendering() {
        let lookup = names(&[("a", "user1"), ("b", "user2"), ("c", "user3")]);

        let both = ParticipantDelta {
            added: vec!["c".to_string()],
            removed: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            summary(&both, &lookup).unwrap(),
            "Removed: user1, user2 · Added: user3"
        );

        let added_only = ParticipantDelta {
            added: vec!["c".to_string()],
            removed: vec![],
        };
        assert_eq!(summary(&added_only, &lookup).unwrap(), "Added: user3");
    }

    #[test]
    fn test_summary_falls_back_to_raw_id() {
        let delta = ParticipantDelta {
            added: vec!["ghost".to_string()],
            removed: vec![],
        };
        assert_eq!(summary(&delta, &HashMap::new()).unwrap(), "Added: ghost");
    }
}
