// Workflow list state management.
// Holds the recent runs, list selection, and duration-bar normalization.

use ratatui::widgets::ListState;

use crate::api::{RunStatus, WorkflowRunRef};
use crate::error::{CinderError, ErrorKind};

use super::selection::RepositorySelection;

/// Most runs the list keeps, newest first.
pub const MAX_RUNS: usize = 10;

pub const MSG_ENTER_SELECTION: &str = "Enter a GitHub owner and repository to begin.";
pub const MSG_NO_RUNS: &str = "No workflows found for this repository.";
pub const MSG_LOADING_RUNS: &str = "Loading workflows";

/// Identifies one issued list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTicket {
    pub generation: u64,
    pub selection: RepositorySelection,
}

/// Color family for a run's duration bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Green,
    Blue,
    Red,
    Gray,
}

impl From<RunStatus> for StatusTone {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => StatusTone::Green,
            RunStatus::InProgress => StatusTone::Blue,
            RunStatus::Failed => StatusTone::Red,
            _ => StatusTone::Gray,
        }
    }
}

/// Longest run duration in seconds, never below 1.
pub fn max_duration(runs: &[WorkflowRunRef]) -> f64 {
    runs.iter()
        .map(WorkflowRunRef::duration_seconds)
        .fold(1.0, f64::max)
}

/// User-facing message for a failed list request.
pub fn list_error_message(error: &CinderError) -> String {
    match error.kind() {
        ErrorKind::AuthRequired => "Unauthorized. Please login again.".to_string(),
        ErrorKind::NotFound => "Repository not found".to_string(),
        _ if error.is_transport() => error.to_string(),
        _ => "Failed to fetch workflows".to_string(),
    }
}

/// Recent runs for the selected repository.
#[derive(Debug, Default)]
pub struct WorkflowListState {
    runs: Vec<WorkflowRunRef>,
    pub list_state: ListState,
}

impl WorkflowListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[WorkflowRunRef] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Replace the list, keeping only the newest entries.
    pub fn set_runs(&mut self, mut runs: Vec<WorkflowRunRef>) {
        runs.truncate(MAX_RUNS);
        self.runs = runs;
        self.reset_selection();
    }

    pub fn clear(&mut self) {
        self.runs.clear();
        self.list_state.select(None);
    }

    /// Filled fraction of a run's duration bar, in `0.0..=1.0`.
    pub fn bar_fraction(&self, run: &WorkflowRunRef) -> f64 {
        (run.duration_seconds() / max_duration(&self.runs)).clamp(0.0, 1.0)
    }

    /// Select the next run in the list.
    pub fn select_next(&mut self) {
        if self.runs.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.runs.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous run in the list.
    pub fn select_prev(&mut self) {
        if self.runs.is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    pub fn selected_run(&self) -> Option<&WorkflowRunRef> {
        self.runs.get(self.list_state.selected()?)
    }

    fn reset_selection(&mut self) {
        let first = if self.runs.is_empty() { None } else { Some(0) };
        self.list_state.select(first);
    }
}
