pub mod notifier;

use std::fmt;

use crate::edit::EditSession;
use crate::filter;
use crate::model::{Field, Record, RecordId};
use crate::paginator::{self, PAGE_SIZE};
use crate::selection::SelectionSet;
use crate::store::RecordStore;

pub use notifier::{ConsoleNotifier, Notice, Notifier, Severity};

pub const MSG_DELETED_ONE: &str = "Deleted user's data successfully";
pub const MSG_DELETED_SELECTED: &str = "Selected users data deleted successfully";
pub const MSG_SAVED: &str = "User data saved successfully";
pub const MSG_FETCH_FAILED: &str = "Cannot fetch data at the moment";

// primitive user actions reported by the renderer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SearchChanged(String),
    GoToPage(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    RowToggled(RecordId),
    SelectAllToggled,
    DeleteOne(RecordId),
    DeleteSelected,
    EditRequested(RecordId),
    FieldEdited {
        id: RecordId,
        field: Field,
        value: String,
    },
    SaveRequested(RecordId),
}

/// Everything a renderer needs for one frame. Rebuilt from [`ListState`]
/// after every transition, never patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderModel {
    pub visible_rows: Vec<Record>,
    pub selected_ids: Vec<RecordId>,
    pub all_selected: bool,
    pub editing_id: Option<RecordId>,
    pub total_pages: usize,
    pub current_page: usize,
    pub search: String,
    pub matching_records: usize,
    pub total_records: usize,
    pub loading: bool,
    pub fetch_failed: bool,
}

#[derive(Debug)]
pub struct Step {
    pub state: ListState,
    pub notices: Vec<Notice>,
}

#[derive(Clone, Debug)]
pub struct ListState {
    store: RecordStore,
    search: String,
    current_page: usize,
    selection: SelectionSet,
    edit: EditSession,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            store: RecordStore::new(),
            search: String::new(),
            current_page: 1,
            selection: SelectionSet::new(),
            edit: EditSession::new(),
        }
    }
}

impl ListState {
    pub fn new(records: Vec<Record>) -> Self {
        let mut state = Self::default();
        state.store.load(records);
        state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn active_view(&self) -> Vec<&Record> {
        filter::apply(self.store.records(), &self.search)
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.active_view().len(), PAGE_SIZE)
    }

    pub fn visible_rows(&self) -> Vec<&Record> {
        paginator::slice(&self.active_view(), self.current_page, PAGE_SIZE).rows
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible_rows().iter().map(|r| r.id.clone()).collect()
    }

    /// The single transition function: consumes the current state and
    /// returns the next consistent one plus any notices to surface.
    pub fn apply(mut self, action: Action) -> Step {
        let mut notices = Vec::new();
        match action {
            Action::SearchChanged(token) => {
                self.search = token;
            }
            Action::GoToPage(n) => {
                let last = self.total_pages().max(1);
                if (1..=last).contains(&n) {
                    self.set_page(n);
                } else {
                    tracing::debug!(page = n, last, "ignoring navigation outside page range");
                }
            }
            Action::FirstPage => self.set_page(1),
            Action::PreviousPage => {
                if self.current_page > 1 {
                    self.set_page(self.current_page - 1);
                }
            }
            Action::NextPage => {
                if self.current_page < self.total_pages() {
                    self.set_page(self.current_page + 1);
                }
            }
            Action::LastPage => {
                let last = self.total_pages().max(1);
                self.set_page(last);
            }
            Action::RowToggled(id) => {
                let visible = self.visible_ids();
                if visible.contains(&id) {
                    self.selection.toggle(&id);
                    self.selection.sync_all_flag(&visible);
                }
            }
            Action::SelectAllToggled => {
                let visible = self.visible_ids();
                self.selection.select_all_visible(&visible);
            }
            Action::DeleteOne(id) => {
                if self.store.delete_one(&id) {
                    self.after_delete();
                    notices.push(Notice::success(MSG_DELETED_ONE));
                }
            }
            Action::DeleteSelected => {
                if !self.selection.is_empty() {
                    let removed = self.store.delete_many(self.selection.ids());
                    tracing::debug!(removed, "deleted selected records");
                    self.after_delete();
                    notices.push(Notice::success(MSG_DELETED_SELECTED));
                }
            }
            Action::EditRequested(id) => {
                if self.store.contains(&id) {
                    self.edit.begin(id);
                }
            }
            Action::FieldEdited { id, field, value } => {
                self.store.mutate_field(&id, &field, value);
            }
            Action::SaveRequested(id) => {
                if self.edit.is_editing(&id) {
                    if let Some(record) = self.store.get(&id) {
                        match self.edit.attempt_commit(record) {
                            Ok(()) => notices.push(Notice::success(MSG_SAVED)),
                            Err(failures) => {
                                notices.extend(failures.iter().map(|f| Notice::error(f.message())))
                            }
                        }
                    }
                } else {
                    tracing::debug!(id = %id, "save ignored, record is not being edited");
                }
            }
        }
        self.reconcile();
        Step {
            state: self,
            notices,
        }
    }

    pub fn render_model(&self) -> RenderModel {
        let view = self.active_view();
        let page = paginator::slice(&view, self.current_page, PAGE_SIZE);
        let selected_ids = page
            .rows
            .iter()
            .filter(|r| self.selection.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();
        RenderModel {
            visible_rows: page.rows.into_iter().cloned().collect(),
            selected_ids,
            all_selected: self.selection.all_selected(),
            editing_id: self.edit.target().cloned(),
            total_pages: page.total_pages,
            current_page: self.current_page,
            search: self.search.clone(),
            matching_records: view.len(),
            total_records: self.store.len(),
            loading: false,
            fetch_failed: false,
        }
    }

    // every page change clears the selection, even a change to the same page
    fn set_page(&mut self, n: usize) {
        self.current_page = n;
        self.selection.clear();
    }

    fn after_delete(&mut self) {
        self.selection.clear();
        if let Some(target) = self.edit.target() {
            if !self.store.contains(target) {
                self.edit.end();
            }
        }
    }

    // restores the cross-facet invariants after any transition
    fn reconcile(&mut self) {
        let len = self.active_view().len();
        let page = paginator::back_off(len, self.current_page, PAGE_SIZE);
        if page != self.current_page {
            tracing::debug!(from = self.current_page, to = page, "page emptied, stepping back");
            self.set_page(page);
        }
        let visible = self.visible_ids();
        self.selection.retain_visible(&visible);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

// owns the state between transitions and routes notices to the notifier.
// Actions are ignored until a load has succeeded.
pub struct ListController<N: Notifier> {
    state: ListState,
    load: LoadState,
    notifier: N,
}

impl<N: Notifier> ListController<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            state: ListState::default(),
            load: LoadState::Loading,
            notifier,
        }
    }

    /// Settles the one startup load. Only the first call counts; a failed
    /// load stays failed.
    pub fn finish_load<E: fmt::Display>(&mut self, result: Result<Vec<Record>, E>) {
        if self.load != LoadState::Loading {
            tracing::warn!(load = ?self.load, "load already settled, ignoring result");
            return;
        }
        match result {
            Ok(records) => {
                self.state = ListState::new(records);
                self.load = LoadState::Ready;
                if self.state.store.is_empty() {
                    tracing::warn!("source returned no records");
                } else {
                    tracing::info!(records = self.state.store.len(), "records loaded");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial fetch failed");
                self.load = LoadState::Failed(e.to_string());
                self.notifier.notify(MSG_FETCH_FAILED, Severity::Error);
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        if self.load != LoadState::Ready {
            tracing::debug!(?action, load = ?self.load, "action ignored, table not ready");
            return false;
        }
        tracing::debug!(?action, "applying action");
        let state = std::mem::take(&mut self.state);
        let Step { state, notices } = state.apply(action);
        self.state = state;
        tracing::debug!(
            page = self.state.current_page,
            total_pages = self.state.total_pages(),
            selected = self.state.selection.len(),
            "transition complete"
        );
        for notice in notices {
            self.notifier.notify(&notice.message, notice.severity);
        }
        true
    }

    pub fn snapshot(&self) -> RenderModel {
        match &self.load {
            LoadState::Ready => self.state.render_model(),
            LoadState::Loading => RenderModel {
                loading: true,
                current_page: 1,
                ..RenderModel::default()
            },
            LoadState::Failed(_) => RenderModel {
                fetch_failed: true,
                current_page: 1,
                ..RenderModel::default()
            },
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
