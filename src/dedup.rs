use crate::types::DeviceRecord;
use std::collections::HashMap;

/// How the `(manufacturer, model)` key is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFolding {
    Exact,
    CaseInsensitive,
}

/// Which record survives when two share a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    FirstWins,
    LastWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupPolicy {
    pub key: KeyFolding,
    pub collision: Collision,
}

impl DedupPolicy {
    pub const fn new(key: KeyFolding, collision: Collision) -> Self {
        Self { key, collision }
    }
}

/// Outcome of offering a record to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    New,
    Replaced,
    Discarded,
}

/// Keyed collection of records that remembers first-insertion order.
///
/// A key's position never moves; under `LastWins` only its value is replaced.
#[derive(Debug)]
pub struct DeviceCatalog {
    policy: DedupPolicy,
    index: HashMap<(String, String), usize>,
    records: Vec<DeviceRecord>,
    duplicates: usize,
}

impl DeviceCatalog {
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            policy,
            index: HashMap::new(),
            records: Vec::new(),
            duplicates: 0,
        }
    }

    fn key_for(&self, record: &DeviceRecord) -> (String, String) {
        match self.policy.key {
            KeyFolding::Exact => (record.manufacturer.clone(), record.model.clone()),
            KeyFolding::CaseInsensitive => (
                record.manufacturer.to_lowercase(),
                record.model.to_lowercase(),
            ),
        }
    }

    pub fn insert(&mut self, record: DeviceRecord) -> Insertion {
        let key = self.key_for(&record);
        match self.index.get(&key) {
            Some(&slot) => {
                self.duplicates += 1;
                match self.policy.collision {
                    Collision::FirstWins => Insertion::Discarded,
                    Collision::LastWins => {
                        self.records[slot] = record;
                        Insertion::Replaced
                    }
                }
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                Insertion::New
            }
        }
    }

    /// Number of records that collided with an existing key
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_records(self) -> Vec<DeviceRecord> {
        self.records
    }
}
