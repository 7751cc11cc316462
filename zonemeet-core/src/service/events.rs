//! Event operations: create, update with audit, localized listing, history.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::diff::{self, ParticipantDelta};
use crate::error::{SchedError, SchedResult};
use crate::model::{
    ChangeLogEntry, EventDiff, EventField, EventRecord, EventSnapshot, Profile, new_id,
};
use crate::time;

use super::Scheduler;

/// Fields of a create request. Presence is validated here rather than at
/// deserialization so the caller gets an error naming the missing field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEvent {
    pub title: Option<String>,
    pub participant_ids: Option<Vec<String>>,
    pub event_timezone: Option<String>,
    pub start_local: Option<String>,
    pub end_local: Option<String>,
}

/// Fields of an update request, all optional. Local times are wall-clock
/// strings interpreted against the event's (possibly just-updated) timezone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub event_timezone: Option<String>,
    pub start_local: Option<String>,
    pub end_local: Option<String>,
    pub participant_ids: Option<Vec<String>>,
}

/// Order in which patch fields are merged into the stored record.
///
/// The timezone comes first on purpose: local times supplied in the same call
/// are interpreted against the newly set zone, not the old one. Stored UTC
/// bounds are never reconverted when no new local time is supplied.
pub const MERGE_ORDER: [EventField; 5] = [
    EventField::EventTimezone,
    EventField::Start,
    EventField::End,
    EventField::Participants,
    EventField::Title,
];

/// A profile's events, each localized to the viewing timezone.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileAgenda {
    pub profile: Profile,
    pub events: Vec<LocalizedEvent>,
}

/// An event with its instants rendered in the viewer's timezone.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedEvent {
    pub id: String,
    pub title: String,
    pub participant_ids: Vec<String>,
    pub event_timezone: String,
    pub start: String,
    pub end: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A change-log entry rendered for a viewer timezone.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedLogEntry {
    pub id: String,
    /// Resolved attribution, `None` when unattributed or when the profile
    /// no longer resolves.
    pub changed_by: Option<ProfileRef>,
    pub timestamp: String,
    pub diff: RenderedDiff,
    /// Which audited fields differ, computed on the stored UTC values so the
    /// set does not depend on the timezone the entry is rendered in.
    /// Empty for creation entries.
    pub changed_fields: Vec<EventField>,
    pub participants: ParticipantDelta,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDiff {
    pub previous: Option<RenderedSnapshot>,
    pub current: RenderedSnapshot,
}

/// A snapshot with start/end projected into the viewer's timezone; title,
/// timezone, and participants pass through unconverted.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSnapshot {
    pub start: String,
    pub end: String,
    pub event_timezone: String,
    pub participant_ids: Vec<String>,
    pub title: String,
}

impl Scheduler {
    /// Validate, convert the local bounds through the event timezone, persist,
    /// and record the creation in the change log.
    ///
    /// Nothing is written on any error path.
    pub fn create_event(&self, req: NewEvent) -> SchedResult<EventRecord> {
        let participants = match req.participant_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(SchedError::MissingField("participant_ids")),
        };
        let tz = req
            .event_timezone
            .ok_or(SchedError::MissingField("event_timezone"))?;
        let start_local = req
            .start_local
            .ok_or(SchedError::MissingField("start_local"))?;
        let end_local = req.end_local.ok_or(SchedError::MissingField("end_local"))?;

        let start_utc = time::local_to_utc(&start_local, &tz)?;
        let end_utc = time::local_to_utc(&end_local, &tz)?;
        if end_utc <= start_utc {
            return Err(SchedError::InvalidRange);
        }

        let now = Utc::now();
        let record = EventRecord {
            id: new_id(),
            title: req
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Event".to_string()),
            participant_ids: participants,
            event_timezone: tz,
            start_utc,
            end_utc,
            created_at_utc: now,
            updated_at_utc: now,
        };

        // Record first, log second: a crash in between loses only audit data
        // and never leaves a log entry for a write that didn't happen.
        self.store().events.insert(record.clone())?;
        self.append_log(
            &record.id,
            None,
            EventDiff::Created {
                current: record.snapshot(),
            },
        );
        tracing::info!(event = %record.id, "created event");

        Ok(record)
    }

    /// Merge `patch` into a stored event in [`MERGE_ORDER`], re-validate the
    /// range on the fully merged record, persist, and append an update entry
    /// carrying full before/after snapshots.
    ///
    /// The stored record is untouched on any error path.
    pub fn update_event(
        &self,
        event_id: &str,
        changed_by: Option<String>,
        patch: EventPatch,
    ) -> SchedResult<EventRecord> {
        let stored = self
            .store()
            .events
            .get(event_id)?
            .ok_or_else(|| SchedError::EventNotFound(event_id.to_string()))?;

        let previous = stored.snapshot();
        let mut draft = stored;

        for field in MERGE_ORDER {
            apply_field(&mut draft, field, &patch)?;
        }

        // Checked against the merged bounds even when only one of the two
        // (or neither) was supplied in this call.
        if draft.end_utc <= draft.start_utc {
            return Err(SchedError::InvalidRange);
        }

        draft.updated_at_utc = Utc::now();
        self.store().events.replace(event_id, draft.clone())?;
        self.append_log(
            event_id,
            changed_by,
            EventDiff::Updated {
                previous,
                current: draft.snapshot(),
            },
        );
        tracing::info!(event = %event_id, "updated event");

        Ok(draft)
    }

    /// Events the profile participates in, localized to `view_tz` (the
    /// profile's own timezone when not given). Read-only.
    pub fn list_events_for_profile(
        &self,
        profile_id: &str,
        view_tz: Option<&str>,
    ) -> SchedResult<ProfileAgenda> {
        let profile = self
            .store()
            .profiles
            .get(profile_id)?
            .ok_or_else(|| SchedError::ProfileNotFound(profile_id.to_string()))?;

        let tz = view_tz.unwrap_or(&profile.timezone);

        let events = self
            .store()
            .events
            .all()?
            .into_iter()
            .filter(|ev| ev.participant_ids.iter().any(|p| p == profile_id))
            .map(|ev| {
                Ok(LocalizedEvent {
                    start: time::utc_to_local(ev.start_utc, tz, None)?,
                    end: time::utc_to_local(ev.end_utc, tz, None)?,
                    created_at: time::utc_to_local(ev.created_at_utc, tz, None)?,
                    updated_at: time::utc_to_local(ev.updated_at_utc, tz, None)?,
                    id: ev.id,
                    title: ev.title,
                    participant_ids: ev.participant_ids,
                    event_timezone: ev.event_timezone,
                })
            })
            .collect::<SchedResult<Vec<_>>>()?;

        Ok(ProfileAgenda { profile, events })
    }

    /// The event's change history in stored (chronological) order, diff times
    /// rendered in `tz` (UTC when not given).
    pub fn event_logs(&self, event_id: &str, tz: Option<&str>) -> SchedResult<Vec<RenderedLogEntry>> {
        let tz = tz.unwrap_or("UTC");
        time::parse_timezone(tz)?;

        let names: HashMap<String, String> = self
            .store()
            .profiles
            .all()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        self.store()
            .logs
            .all()?
            .into_iter()
            .filter(|entry| entry.event_id == event_id)
            .map(|entry| render_log_entry(entry, tz, &names))
            .collect()
    }

    /// Log appends are best-effort: the record write already succeeded, so a
    /// failure here is reported, not rolled back.
    fn append_log(&self, event_id: &str, changed_by: Option<String>, diff: EventDiff) {
        let entry = ChangeLogEntry {
            id: new_id(),
            event_id: event_id.to_string(),
            changed_by,
            timestamp_utc: Utc::now(),
            diff,
        };
        if let Err(err) = self.store().logs.insert(entry) {
            tracing::error!(event = %event_id, error = %err, "failed to append change log entry");
        }
    }
}

fn apply_field(draft: &mut EventRecord, field: EventField, patch: &EventPatch) -> SchedResult<()> {
    match field {
        EventField::EventTimezone => {
            if let Some(tz) = patch.event_timezone.as_deref().filter(|t| !t.is_empty()) {
                time::parse_timezone(tz)?;
                draft.event_timezone = tz.to_string();
            }
        }
        EventField::Start => {
            if let Some(local) = patch.start_local.as_deref().filter(|s| !s.is_empty()) {
                draft.start_utc = time::local_to_utc(local, &draft.event_timezone)?;
            }
        }
        EventField::End => {
            if let Some(local) = patch.end_local.as_deref().filter(|s| !s.is_empty()) {
                draft.end_utc = time::local_to_utc(local, &draft.event_timezone)?;
            }
        }
        EventField::Participants => {
            if let Some(ids) = &patch.participant_ids {
                draft.participant_ids = ids.clone();
            }
        }
        EventField::Title => {
            if let Some(title) = patch.title.as_deref().filter(|t| !t.is_empty()) {
                draft.title = title.to_string();
            }
        }
    }
    Ok(())
}

fn render_log_entry(
    entry: ChangeLogEntry,
    tz: &str,
    names: &HashMap<String, String>,
) -> SchedResult<RenderedLogEntry> {
    let current = entry.diff.current();

    let changed_fields = match entry.diff.previous() {
        Some(previous) => diff::changed_fields(previous, current),
        None => Vec::new(),
    };

    // For creation entries the delta is taken against an empty "before", so
    // every initial participant reads as added.
    let prev_ids: &[String] = match entry.diff.previous() {
        Some(previous) => &previous.participant_ids,
        None => &[],
    };
    let delta = diff::participant_delta(prev_ids, &current.participant_ids);
    let summary = diff::summary(&delta, names);

    Ok(RenderedLogEntry {
        changed_by: entry.changed_by.as_ref().and_then(|id| {
            names.get(id).map(|name| ProfileRef {
                id: id.clone(),
                name: name.clone(),
            })
        }),
        timestamp: time::utc_to_local(entry.timestamp_utc, tz, None)?,
        diff: RenderedDiff {
            previous: entry
                .diff
                .previous()
                .map(|s| render_snapshot(s, tz))
                .transpose()?,
            current: render_snapshot(current, tz)?,
        },
        id: entry.id,
        changed_fields,
        participants: delta,
        summary,
    })
}

fn render_snapshot(snap: &EventSnapshot, tz: &str) -> SchedResult<RenderedSnapshot> {
    Ok(RenderedSnapshot {
        start: time::utc_to_local(snap.start_utc, tz, None)?,
        end: time::utc_to_local(snap.end_utc, tz, None)?,
        event_timezone: snap.event_timezone.clone(),
        participant_ids: snap.participant_ids.clone(),
        title: snap.title.clone(),
    })
}
