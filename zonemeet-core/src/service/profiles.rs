//! Profile operations.

use chrono::Utc;

use crate::error::{SchedError, SchedResult};
use crate::model::{Profile, new_id};
use crate::time;

use super::Scheduler;

impl Scheduler {
    /// Create a profile. The timezone defaults to UTC and must resolve to a
    /// known IANA identifier.
    pub fn create_profile(&self, name: &str, timezone: Option<&str>) -> SchedResult<Profile> {
        if name.trim().is_empty() {
            return Err(SchedError::MissingField("name"));
        }
        let tz = timezone.unwrap_or("UTC");
        time::parse_timezone(tz)?;

        let now = Utc::now();
        let profile = Profile {
            id: new_id(),
            name: name.to_string(),
            timezone: tz.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.store().profiles.insert(profile.clone())?;
        tracing::info!(profile = %profile.id, name = %profile.name, "created profile");

        Ok(profile)
    }

    /// All profiles, sorted by name (case-sensitive).
    pub fn list_profiles(&self) -> SchedResult<Vec<Profile>> {
        let mut profiles = self.store().profiles.all()?;
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    /// Merge name and/or timezone into an existing profile.
    /// Empty strings are treated as not supplied.
    pub fn update_profile(
        &self,
        id: &str,
        name: Option<&str>,
        timezone: Option<&str>,
    ) -> SchedResult<Profile> {
        let mut profile = self
            .store()
            .profiles
            .get(id)?
            .ok_or_else(|| SchedError::ProfileNotFound(id.to_string()))?;

        if let Some(tz) = timezone.filter(|t| !t.is_empty()) {
            time::parse_timezone(tz)?;
            profile.timezone = tz.to_string();
        }
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            profile.name = name.to_string();
        }
        profile.updated_at = Utc::now();

        self.store().profiles.replace(id, profile.clone())?;
        tracing::info!(profile = %profile.id, "updated profile");

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (tempfile::TempDir, Scheduler) {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = Scheduler::open(dir.path()).unwrap();
        (dir, scheduler)
    }

    #[test]
    fn test_create_profile_defaults_to_utc() {
        let (_dir, scheduler) = scheduler();
        let profile = scheduler.create_profile("user1", None).unwrap();
        assert_eq!(profile.timezone, "UTC");
    }

    #[test]
    fn test_create_profile_requires_name() {
        let (_dir, scheduler) = scheduler();
        let err = scheduler.create_profile("  ", None).unwrap_err();
        assert!(matches!(err, SchedError::MissingField("name")));
        assert!(scheduler.list_profiles().unwrap().is_empty());
    }

    #[test]
    fn test_create_profile_rejects_unknown_timezone() {
        let (_dir, scheduler) = scheduler();
        let err = scheduler
            .create_profile("user1", Some("Atlantis/Central"))
            .unwrap_err();
        assert!(matches!(err, SchedError::InvalidTimezone(_)));
    }

    #[test]
    fn test_list_profiles_sorted_by_name_case_sensitive() {
        let (_dir, scheduler) = scheduler();
        for name in ["bob", "Alice", "Zoe", "alice"] {
            scheduler.create_profile(name, None).unwrap();
        }
        let names: Vec<String> = scheduler
            .list_profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        // Byte-order compare: uppercase before lowercase
        assert_eq!(names, vec!["Alice", "Zoe", "alice", "bob"]);
    }

    #[test]
    fn test_update_profile_merges_fields() {
        let (_dir, scheduler) = scheduler();
        let profile = scheduler
            .create_profile("user1", Some("America/New_York"))
            .unwrap();

        let updated = scheduler
            .update_profile(&profile.id, None, Some("Asia/Tokyo"))
            .unwrap();
        assert_eq!(updated.name, "user1");
        assert_eq!(updated.timezone, "Asia/Tokyo");
        assert!(updated.updated_at >= profile.updated_at);
    }

    #[test]
    fn test_update_unknown_profile() {
        let (_dir, scheduler) = scheduler();
        let err = scheduler
            .update_profile("missing", Some("x"), None)
            .unwrap_err();
        assert!(matches!(err, SchedError::ProfileNotFound(_)));
    }
}
