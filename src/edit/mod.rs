pub mod validator;

use crate::model::{Record, RecordId};

pub use validator::ValidationFailure;

// at most one record is in inline-edit mode across the whole view. A new
// `begin` overwrites the current target; field edits are written straight
// into the store, so an abandoned session leaves its edits behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    target: Option<RecordId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: RecordId) {
        self.target = Some(id);
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&RecordId> {
        self.target.as_ref()
    }

    pub fn is_editing(&self, id: &RecordId) -> bool {
        self.target.as_ref() == Some(id)
    }

    pub fn end(&mut self) {
        self.target = None;
    }

    /// Validates the record; the session only ends when it passes.
    pub fn attempt_commit(&mut self, record: &Record) -> Result<(), Vec<ValidationFailure>> {
        let failures = validator::validate(record);
        if failures.is_empty() {
            self.end();
            Ok(())
        } else {
            Err(failures)
        }
    }
}
