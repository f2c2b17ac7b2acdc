use std::collections::HashSet;

use crate::model::RecordId;

// checked rows, interpreted against the visible page only. `all_selected` is
// tracked on its own so "select all" flips deterministically, even when the
// visible slice is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<RecordId>,
    all_selected: bool,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &RecordId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    pub fn select_all_visible(&mut self, visible: &[RecordId]) {
        if self.all_selected {
            self.ids.clear();
            self.all_selected = false;
        } else {
            self.ids = visible.iter().cloned().collect();
            self.all_selected = true;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.all_selected = false;
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<RecordId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    /// Drops the flag once the selection stops matching the visible ids.
    pub fn sync_all_flag(&mut self, visible: &[RecordId]) {
        if self.all_selected && !self.equals(visible) {
            self.all_selected = false;
        }
    }

    pub fn retain_visible(&mut self, visible: &[RecordId]) {
        let keep: HashSet<&RecordId> = visible.iter().collect();
        self.ids.retain(|id| keep.contains(id));
        self.sync_all_flag(visible);
    }

    fn equals(&self, visible: &[RecordId]) -> bool {
        self.ids.len() == visible.len() && visible.iter().all(|id| self.ids.contains(id))
    }
}
