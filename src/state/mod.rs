// State management module.
// Holds the shared view-state record and the pieces each component owns.

pub mod requests;
pub mod selection;
pub mod session;
pub mod summary;
pub mod workflows;

pub use requests::RequestSequence;
pub use selection::{RepositorySelection, on_selection_changed};
pub use session::SessionState;
pub use summary::{SummaryState, SummaryTicket};
pub use workflows::{ListTicket, StatusTone, WorkflowListState};

/// Loading flags and the single visible error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiTransientState {
    pub is_loading_list: bool,
    pub is_loading_summary: bool,
    pub error_message: Option<String>,
}

/// Screen the dashboard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    /// Auth status request not yet resolved.
    CheckingSession,
    /// Session missing or expired.
    LoginRequired,
    List,
    Summary,
}

/// Everything the UI renders from.
#[derive(Debug, Default)]
pub struct ViewState {
    pub session: SessionState,
    pub selection: RepositorySelection,
    pub workflows: WorkflowListState,
    pub summary: SummaryState,
    pub ui: UiTransientState,
}

impl ViewState {
    pub fn active_view(&self) -> ActiveView {
        if !self.session.checked {
            ActiveView::CheckingSession
        } else if !self.session.authenticated {
            ActiveView::LoginRequired
        } else if self.summary.detail.is_some() || self.ui.is_loading_summary {
            ActiveView::Summary
        } else {
            ActiveView::List
        }
    }

    /// Message shown in place of the run list, if any.
    pub fn list_placeholder(&self) -> Option<&'static str> {
        if self.ui.is_loading_list {
            Some(workflows::MSG_LOADING_RUNS)
        } else if self.selection.is_blank() {
            Some(workflows::MSG_ENTER_SELECTION)
        } else if self.selection.is_complete()
            && self.workflows.is_empty()
            && self.ui.error_message.is_none()
        {
            Some(workflows::MSG_NO_RUNS)
        } else {
            None
        }
    }

    /// Replace the visible error.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.ui.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.ui.error_message = None;
    }
}
