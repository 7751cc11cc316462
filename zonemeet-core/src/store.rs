//! Flat-file JSON persistence.
//!
//! Each collection lives in a single pretty-printed JSON array file; every
//! operation reads or writes the whole file. Callers read-modify-write
//! complete records; there is no partial-field update operator.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SchedResult;
use crate::model::{ChangeLogEntry, EventRecord, Profile};

/// A record addressable by its string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Profile {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for EventRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ChangeLogEntry {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One JSON-array file holding a whole collection.
#[derive(Debug, Clone)]
pub struct JsonCollection<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned + Keyed> JsonCollection<T> {
    fn new(path: PathBuf) -> Self {
        JsonCollection {
            path,
            _marker: PhantomData,
        }
    }

    /// Read the whole collection. A missing file is an empty collection.
    pub fn all(&self) -> SchedResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, id: &str) -> SchedResult<Option<T>> {
        Ok(self.all()?.into_iter().find(|r| r.key() == id))
    }

    /// Append a record and persist the collection.
    pub fn insert(&self, record: T) -> SchedResult<()> {
        let mut records = self.all()?;
        records.push(record);
        self.write(&records)
    }

    /// Swap the record with this id for a new complete value.
    /// Returns false (and writes nothing) when the id is absent.
    pub fn replace(&self, id: &str, record: T) -> SchedResult<bool> {
        let mut records = self.all()?;
        match records.iter_mut().find(|r| r.key() == id) {
            Some(slot) => *slot = record,
            None => return Ok(false),
        }
        self.write(&records)?;
        Ok(true)
    }

    fn write(&self, records: &[T]) -> SchedResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// The three collections backing the scheduler, rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    pub profiles: JsonCollection<Profile>,
    pub events: JsonCollection<EventRecord>,
    pub logs: JsonCollection<ChangeLogEntry>,
}

impl Store {
    /// Open a store at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> SchedResult<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Store {
            profiles: JsonCollection::new(data_dir.join("profiles.json")),
            events: JsonCollection::new(data_dir.join("events.json")),
            logs: JsonCollection::new(data_dir.join("logs.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_profile(name: &str) -> Profile {
        let now = Utc::now();
        Profile {
            id: crate::model::new_id(),
            name: name.to_string(),
            timezone: "UTC".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.profiles.all().unwrap().is_empty());
        assert!(store.profiles.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let profile = make_profile("user1");
        store.profiles.insert(profile.clone()).unwrap();

        let loaded = store.profiles.get(&profile.id).unwrap().unwrap();
        assert_eq!(loaded.name, "user1");
        assert_eq!(store.profiles.all().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_swaps_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let mut profile = make_profile("before");
        store.profiles.insert(profile.clone()).unwrap();

        profile.name = "after".to_string();
        profile.timezone = "Asia/Tokyo".to_string();
        assert!(store.profiles.replace(&profile.id, profile.clone()).unwrap());

        let loaded = store.profiles.get(&profile.id).unwrap().unwrap();
        assert_eq!(loaded.name, "after");
        assert_eq!(loaded.timezone, "Asia/Tokyo");
        assert_eq!(store.profiles.all().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_unknown_id_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        store.profiles.insert(make_profile("user1")).unwrap();
        assert!(!store.profiles.replace("missing", make_profile("x")).unwrap());
        assert_eq!(store.profiles.all().unwrap().len(), 1);
        assert_eq!(store.profiles.all().unwrap()[0].name, "user1");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        for name in ["c", "a", "b"] {
            store.profiles.insert(make_profile(name)).unwrap();
        }
        let names: Vec<String> = store
            .profiles
            .all()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
