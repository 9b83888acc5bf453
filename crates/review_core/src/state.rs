use review_logging::{review_info, review_warn};

use crate::view_model::{tree_rows, AppViewModel};
use crate::{
    BookmarkId, CounterSnapshot, DuplicateGroup, DuplicateView, EditMode, PendingConfirmation,
    ResultNode, ResultsView, ReviewError, RunCounters,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    /// `execute` was sent; waiting for the engine to announce the run.
    Requested,
    Running,
    Finished,
}

/// Which parts of the result panel are offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub show_no_results: bool,
    pub show_search: bool,
    pub show_filters: bool,
    pub show_mass_actions: bool,
    pub show_debug: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultPane {
    #[default]
    Empty,
    Tree(ResultsView),
    Duplicates(DuplicateView),
}

impl ResultPane {
    pub fn name(&self) -> &'static str {
        match self {
            ResultPane::Empty => "empty",
            ResultPane::Tree(_) => "tree",
            ResultPane::Duplicates(_) => "duplicates",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSurface {
    pub bookmark_id: BookmarkId,
    pub title: String,
    pub url: String,
    pub mode: EditMode,
}

/// The whole view context: one owner, passed through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    run_seq: u64,
    phase: RunPhase,
    counters: RunCounters,
    affordances: Affordances,
    debug_output: Option<String>,
    pane: ResultPane,
    pending: Option<PendingConfirmation>,
    edit: Option<EditSurface>,
    last_condition: Option<ReviewError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (search_pattern, categories, rows) = match &self.pane {
            ResultPane::Tree(results) => (
                results.filters().search.pattern().to_string(),
                results.filters().categories.toggles(),
                tree_rows(results.tree()),
            ),
            _ => (String::new(), Vec::new(), Vec::new()),
        };
        let duplicates = match &self.pane {
            ResultPane::Duplicates(view) => view.groups().to_vec(),
            _ => Vec::new(),
        };

        AppViewModel {
            phase: self.phase,
            start_enabled: self.start_enabled(),
            counters: self.counters,
            affordances: self.affordances,
            debug_output: self.debug_output.clone(),
            search_pattern,
            categories,
            rows,
            duplicates,
            pending: self.pending.clone(),
            edit: self.edit.clone(),
            last_condition: self.last_condition.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn start_enabled(&self) -> bool {
        matches!(self.phase, RunPhase::Idle | RunPhase::Finished)
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn pane(&self) -> &ResultPane {
        &self.pane
    }

    pub fn results(&self) -> Option<&ResultsView> {
        match &self.pane {
            ResultPane::Tree(results) => Some(results),
            _ => None,
        }
    }

    pub fn duplicates(&self) -> Option<&DuplicateView> {
        match &self.pane {
            ResultPane::Duplicates(view) => Some(view),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn edit_surface(&self) -> Option<&EditSurface> {
        self.edit.as_ref()
    }

    pub fn last_condition(&self) -> Option<&ReviewError> {
        self.last_condition.as_ref()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn report(&mut self, condition: ReviewError) {
        review_warn!("{}", condition);
        self.last_condition = Some(condition);
        self.dirty = true;
    }

    pub(crate) fn clear_condition(&mut self) {
        if self.last_condition.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn pane_mut(&mut self) -> &mut ResultPane {
        &mut self.pane
    }

    pub(crate) fn request_run(&mut self) {
        self.phase = RunPhase::Requested;
        self.dirty = true;
    }

    pub(crate) fn begin_run(&mut self, total: u64) {
        self.run_seq += 1;
        review_logging::set_run_seq(self.run_seq);
        review_info!("Run started with {} bookmarks", total);

        self.phase = RunPhase::Running;
        self.counters = RunCounters::started(total);
        self.affordances = Affordances::default();
        self.debug_output = None;
        self.pane = ResultPane::Empty;
        self.pending = None;
        self.edit = None;
        self.last_condition = None;
        self.dirty = true;
    }

    pub(crate) fn apply_counters(&mut self, snapshot: CounterSnapshot) {
        self.counters.apply(snapshot);
        self.dirty = true;
    }

    pub(crate) fn finish_with_tree(&mut self, bookmarks: &[ResultNode], debug: Vec<String>) {
        let results = ResultsView::build(bookmarks);
        let has_issues = self.counters.marked() > 0;
        self.affordances = Affordances {
            show_no_results: !has_issues,
            show_search: has_issues,
            show_filters: has_issues,
            show_mass_actions: self.counters.warnings > 0,
            show_debug: !debug.is_empty(),
        };
        self.debug_output = if debug.is_empty() {
            None
        } else {
            Some(format!("[{}]", debug.join(",")))
        };
        review_info!(
            "Run finished: {} marked bookmarks, {} nodes in view",
            self.counters.marked(),
            results.tree().len()
        );
        self.pane = ResultPane::Tree(results);
        self.phase = RunPhase::Finished;
        self.dirty = true;
    }

    pub(crate) fn finish_with_duplicates(&mut self, warnings: u64, groups: Vec<DuplicateGroup>) {
        self.counters.warnings = warnings;
        self.affordances = Affordances {
            show_no_results: warnings == 0,
            ..Affordances::default()
        };
        self.debug_output = None;
        let view = DuplicateView::build(groups);
        review_info!(
            "Duplicate scan finished: {} warnings, {} entries",
            warnings,
            view.entry_count()
        );
        self.pane = ResultPane::Duplicates(view);
        self.phase = RunPhase::Finished;
        self.dirty = true;
    }

    pub(crate) fn set_pending(&mut self, pending: PendingConfirmation) {
        self.pending = Some(pending);
        self.dirty = true;
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingConfirmation> {
        let pending = self.pending.take();
        if pending.is_some() {
            self.dirty = true;
        }
        pending
    }

    pub(crate) fn open_edit(&mut self, surface: EditSurface) {
        self.edit = Some(surface);
        self.dirty = true;
    }

    pub(crate) fn take_edit(&mut self) -> Option<EditSurface> {
        let edit = self.edit.take();
        if edit.is_some() {
            self.dirty = true;
        }
        edit
    }

    pub(crate) fn close_view(&mut self) {
        self.pane = ResultPane::Empty;
        self.affordances = Affordances::default();
        self.debug_output = None;
        self.pending = None;
        self.edit = None;
        self.dirty = true;
    }
}
