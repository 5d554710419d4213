//! Local authoritative record set
//!
//! Storage reports changes as deltas; consumers that want the full-snapshot
//! view keep a [`RecordSet`], apply each delta once the write has succeeded,
//! and aggregate the whole set afterwards.

use crate::models::ExpenseRecord;

/// A confirmed change to the stored record set
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Added(ExpenseRecord),
    Removed(i64),
}

/// Records kept newest first (timestamp desc, then id desc)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<ExpenseRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut records: Vec<ExpenseRecord>) -> Self {
        records.sort_by(newest_first);
        Self { records }
    }

    /// Apply a delta; returns false when it changed nothing
    /// (duplicate add, or removal of an unknown id)
    pub fn apply(&mut self, change: Change) -> bool {
        match change {
            Change::Added(record) => {
                if self.records.iter().any(|r| r.id == record.id) {
                    return false;
                }
                let pos = self
                    .records
                    .partition_point(|r| newest_first(r, &record).is_lt());
                self.records.insert(pos, record);
                true
            }
            Change::Removed(id) => {
                let before = self.records.len();
                self.records.retain(|r| r.id != id);
                self.records.len() != before
            }
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn newest_first(a: &ExpenseRecord, b: &ExpenseRecord) -> std::cmp::Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
}
