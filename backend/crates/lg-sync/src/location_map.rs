use lg_core::{BroadcastRecord, Identity};

use std::collections::BTreeMap;

/// Identities that appeared or disappeared in one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipChange {
    pub joined: Vec<Identity>,
    pub left: Vec<Identity>,
}

impl MembershipChange {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// An observer's local copy of the collection, keyed by identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationMap {
    records: BTreeMap<Identity, BroadcastRecord>,
}

impl LocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the map hold exactly `records`. Anything not present is removed;
    /// duplicate ids keep the last record.
    pub fn replace_with(
        &mut self,
        records: impl IntoIterator<Item = BroadcastRecord>,
    ) -> MembershipChange {
        let next: BTreeMap<Identity, BroadcastRecord> = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let joined = next
            .keys()
            .filter(|key| !self.records.contains_key(*key))
            .cloned()
            .collect();
        let left = self
            .records
            .keys()
            .filter(|key| !next.contains_key(*key))
            .cloned()
            .collect();

        self.records = next;
        MembershipChange { joined, left }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, key: &Identity) -> Option<&BroadcastRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &Identity) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Identity> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &BroadcastRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
