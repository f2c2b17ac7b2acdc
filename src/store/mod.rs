use std::collections::HashSet;

use crate::model::{Field, Record, RecordId};

// the authoritative, ordered record collection; ids are unique at all times
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection wholesale. Later duplicates of an id are dropped.
    pub fn load(&mut self, records: Vec<Record>) {
        let mut seen: HashSet<RecordId> = HashSet::with_capacity(records.len());
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id.clone()) {
                out.push(record);
            } else {
                tracing::warn!(id = %record.id, "dropping record with duplicate id");
            }
        }
        self.records = out;
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

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    // no validation here, commit time does that
    pub fn mutate_field(&mut self, id: &RecordId, field: &Field, value: String) -> bool {
        match self.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn delete_one(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        self.records.len() != before
    }

    pub fn delete_many(&mut self, ids: &HashSet<RecordId>) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        before - self.records.len()
    }
}
