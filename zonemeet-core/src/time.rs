//! Conversion between civil wall-clock times and UTC instants.
//!
//! A wall-clock time carries no offset; it only means something relative to
//! an IANA timezone. Events are stored as UTC instants and projected back
//! into whatever zone a viewer asks for at read time.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{SchedError, SchedResult};

/// Display format used when none is given: "Oct 15, 2025 at 09:00 AM".
pub const DEFAULT_FORMAT: &str = "%b %-d, %Y at %I:%M %p";

/// Accepted wall-clock input layouts (HTML `datetime-local` and friends).
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Resolve an IANA timezone identifier.
pub fn parse_timezone(tz: &str) -> SchedResult<Tz> {
    tz.parse::<Tz>()
        .map_err(|_| SchedError::InvalidTimezone(tz.to_string()))
}

/// Interpret a wall-clock string as observed in `tz` and resolve it to an
/// absolute UTC instant.
///
/// DST folds resolve to the earlier of the two candidate instants; times that
/// fall in a DST gap resolve to the first representable civil minute after
/// the gap. Both cases are deterministic and never fail for an otherwise
/// valid input.
pub fn local_to_utc(local: &str, tz: &str) -> SchedResult<DateTime<Utc>> {
    let zone = parse_timezone(tz)?;
    let naive = parse_local(local)?;

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => resolve_gap(zone, naive),
    }
}

/// Project a UTC instant into `tz` and render it with `format`
/// ([`DEFAULT_FORMAT`] when `None`).
pub fn utc_to_local(
    instant: DateTime<Utc>,
    tz: &str,
    format: Option<&str>,
) -> SchedResult<String> {
    let zone = parse_timezone(tz)?;
    let fmt = format.unwrap_or(DEFAULT_FORMAT);
    Ok(instant.with_timezone(&zone).format(fmt).to_string())
}

fn parse_local(local: &str) -> SchedResult<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local.trim(), fmt).ok())
        .ok_or_else(|| SchedError::InvalidTimeFormat(local.to_string()))
}

/// A civil time inside a DST gap never happened in `zone`. Scan forward in
/// minute steps until the clock becomes representable again. Gaps are at most
/// a few hours anywhere in the tz database; the scan is bounded at 26h so it
/// stays total even on pathological zone data.
fn resolve_gap(zone: Tz, naive: NaiveDateTime) -> SchedResult<DateTime<Utc>> {
    let mut probe = naive;
    for _ in 0..(26 * 60) {
        probe += Duration::minutes(1);
        match zone.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return Ok(dt.with_timezone(&Utc));
            }
            LocalResult::None => continue,
        }
    }
    Err(SchedError::InvalidTimeFormat(naive.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const MINUTE_FMT: &str = "%Y-%m-%dT%H:%M";

    #[test]
    fn test_kolkata_offset() {
        // IST is UTC+5:30, no DST
        let utc = local_to_utc("2025-10-15T09:00", "Asia/Kolkata").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 10, 15, 3, 30, 0).unwrap());
    }

    #[test]
    fn test_seconds_and_space_separator_accepted() {
        let a = local_to_utc("2025-10-15T09:00:00", "Asia/Kolkata").unwrap();
        let b = local_to_utc("2025-10-15 09:00", "Asia/Kolkata").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_timezone() {
        let err = local_to_utc("2025-10-15T09:00", "Mars/Olympus").unwrap_err();
        assert!(matches!(err, SchedError::InvalidTimezone(_)));

        let err = utc_to_local(Utc::now(), "not-a-zone", None).unwrap_err();
        assert!(matches!(err, SchedError::InvalidTimezone(_)));
    }

    #[test]
    fn test_unparsable_local_time() {
        let err = local_to_utc("next tuesday", "UTC").unwrap_err();
        assert!(matches!(err, SchedError::InvalidTimeFormat(_)));
    }

    #[test]
    fn test_default_format() {
        let utc = Utc.with_ymd_and_hms(2025, 10, 15, 3, 30, 0).unwrap();
        let rendered = utc_to_local(utc, "Asia/Kolkata", None).unwrap();
        assert_eq!(rendered, "Oct 15, 2025 at 09:00 AM");
    }

    #[test]
    fn test_round_trip_minute_precision() {
        for input in ["2025-06-01T15:45", "2025-01-15T00:00", "2025-12-31T23:59"] {
            for tz in ["America/New_York", "Asia/Kolkata", "UTC", "Pacific/Chatham"] {
                let utc = local_to_utc(input, tz).unwrap();
                let back = utc_to_local(utc, tz, Some(MINUTE_FMT)).unwrap();
                assert_eq!(back, input, "round trip failed for {input} in {tz}");
            }
        }
    }

    #[test]
    fn test_dst_fold_resolves_to_earlier_instant() {
        // 2025-11-02 01:30 happens twice in New York; we pick the EDT (-4) one.
        let utc = local_to_utc("2025-11-02T01:30", "America/New_York").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 11, 2, 5, 30, 0).unwrap());

        // Round trip still lands on the same wall clock.
        let back = utc_to_local(utc, "America/New_York", Some(MINUTE_FMT)).unwrap();
        assert_eq!(back, "2025-11-02T01:30");
    }

    #[test]
    fn test_dst_gap_resolves_forward() {
        // 2025-03-09 02:30 never happened in New York; the first valid civil
        // minute after the gap is 03:00 EDT = 07:00 UTC.
        let utc = local_to_utc("2025-03-09T02:30", "America/New_York").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 3, 9, 7, 0, 0).unwrap());
        assert_eq!(utc.minute(), 0);
    }
}
