use lg_core::{BroadcastRecord, Identity};

/// Which phase of the subscription contract a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// First delivery after subscribing: the full collection
    Initial,
    /// Every later delivery
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// One document-level change that caused a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub kind: ChangeKind,
    pub key: Identity,
}

/// A change notification for one collection.
///
/// `records` is always the complete current membership of the collection;
/// `changes` only describes what triggered this delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub collection: String,
    pub kind: SnapshotKind,
    pub records: Vec<BroadcastRecord>,
    pub changes: Vec<DocumentChange>,
}

impl CollectionSnapshot {
    /// First delivery: every record counts as added.
    pub fn initial(collection: impl Into<String>, records: Vec<BroadcastRecord>) -> Self {
        let changes = records
            .iter()
            .map(|record| DocumentChange {
                kind: ChangeKind::Added,
                key: record.id.clone(),
            })
            .collect();

        Self {
            collection: collection.into(),
            kind: SnapshotKind::Initial,
            records,
            changes,
        }
    }

    pub fn incremental(
        collection: impl Into<String>,
        records: Vec<BroadcastRecord>,
        changes: Vec<DocumentChange>,
    ) -> Self {
        Self {
            collection: collection.into(),
            kind: SnapshotKind::Incremental,
            records,
            changes,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Identity> {
        self.records.iter().map(|record| &record.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
