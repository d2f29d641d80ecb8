// ABOUTME: Priority-ordered ledger of treatment records for a single category.
// ABOUTME: reconcile() is the pure renumbering step applied after every insert, update, and delete.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::IndexOutOfRange;
use crate::record::Record;

/// Result of a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Records sorted ascending by priority, renumbered to `1..=N`.
    pub records: Vec<Record>,
    /// The record taken out at `removed_index`, if one was requested.
    pub removed: Option<Record>,
    /// Final position of the incoming record, if one was supplied.
    pub placed: Option<usize>,
}

/// Apply one mutation to a ledger's records and restore the dense-priority
/// invariant.
///
/// The removal (if any) happens first, so a record that is replaced while
/// keeping its own priority never collides with itself. When the incoming
/// priority is already taken, every record at or above it is shifted up by
/// one before the incoming record is appended. The result is then stably
/// sorted by priority and renumbered from 1, which means a colliding record
/// takes the contested slot and the incumbent lands directly below it.
pub fn reconcile(
    mut records: Vec<Record>,
    incoming: Option<Record>,
    removed_index: Option<usize>,
) -> Result<Reconciled, IndexOutOfRange> {
    let removed = match removed_index {
        Some(index) => Some(take_at(&mut records, index)?),
        None => None,
    };
    let placed = settle(&mut records, incoming);

    Ok(Reconciled {
        records,
        removed,
        placed,
    })
}

fn take_at(records: &mut Vec<Record>, index: usize) -> Result<Record, IndexOutOfRange> {
    if index >= records.len() {
        return Err(IndexOutOfRange {
            index,
            len: records.len(),
        });
    }
    Ok(records.remove(index))
}

/// Shift on collision, append, sort, renumber. Returns the incoming record's
/// final index.
fn settle(records: &mut Vec<Record>, incoming: Option<Record>) -> Option<usize> {
    let mut placed = None;
    if let Some(record) = incoming {
        let wanted = record.priority;
        if records.iter().any(|r| r.priority == wanted) {
            tracing::debug!(priority = wanted, "priority collision, shifting incumbents");
            for existing in records.iter_mut().filter(|r| r.priority >= wanted) {
                existing.priority = existing.priority.saturating_add(1);
            }
        }
        // Stable sort keeps the appended record after every equal priority.
        placed = Some(records.iter().filter(|r| r.priority <= wanted).count());
        records.push(record);
    }

    records.sort_by_key(|r| r.priority);
    for (position, record) in records.iter_mut().enumerate() {
        record.priority = u32::try_from(position + 1).unwrap_or(u32::MAX);
    }
    placed
}

/// The ordered records of one category. Always sorted ascending by priority,
/// so indexes handed to callers address that order. Indexes are not stable
/// across mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Record>")]
pub struct Ledger {
    records: Vec<Record>,
}

impl From<Vec<Record>> for Ledger {
    /// Stable-sorts by stored priority without renumbering, so hand-edited
    /// files read back in priority order.
    fn from(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.priority);
        Self { records }
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// True when a record with this name (case-insensitive) already exists.
    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.has_name(name))
    }

    /// True when stored priorities are exactly `1..=N` in order.
    pub fn is_dense(&self) -> bool {
        self.records
            .iter()
            .enumerate()
            .all(|(i, r)| usize::try_from(r.priority).is_ok_and(|p| p == i + 1))
    }

    /// Insert a record and renumber. Returns the record's final index.
    pub fn insert(&mut self, record: Record) -> usize {
        self.apply(Some(record), None).unwrap_or(0)
    }

    /// Replace the record at `index` with `record` and renumber. Returns the
    /// replaced record and the new record's final index.
    pub fn update(&mut self, index: usize, record: Record) -> Result<(Record, usize), IndexOutOfRange> {
        let old = self.at(index)?.clone();
        let placed = self.apply(Some(record), Some(index))?;
        Ok((old, placed))
    }

    /// Remove the record at `index` and renumber the rest.
    pub fn delete(&mut self, index: usize) -> Result<Record, IndexOutOfRange> {
        let old = self.at(index)?.clone();
        self.apply(None, Some(index))?;
        Ok(old)
    }

    fn at(&self, index: usize) -> Result<&Record, IndexOutOfRange> {
        self.records.get(index).ok_or(IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    // Records are replaced only when reconcile succeeds.
    fn apply(
        &mut self,
        incoming: Option<Record>,
        removed_index: Option<usize>,
    ) -> Result<usize, IndexOutOfRange> {
        let done = reconcile(self.records.clone(), incoming, removed_index)?;
        self.records = done.records;
        Ok(done.placed.unwrap_or(0))
    }
}
