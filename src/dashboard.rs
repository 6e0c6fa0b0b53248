// Dashboard controller.
// Drives session, selection, list, and summary transitions over the shared view state.

use crate::api::{WorkflowDetail, WorkflowRunRef};
use crate::error::{CinderError, Result};
use crate::state::summary::summary_error_message;
use crate::state::workflows::list_error_message;
use crate::state::{
    ListTicket, RepositorySelection, RequestSequence, SessionState, SummaryTicket, ViewState,
    on_selection_changed,
};
use crate::store::KeyValueStore;

pub const MSG_ENTER_OWNER_AND_REPO: &str = "Please enter owner and repo";

/// Owns the view state and the selection store.
///
/// Requests are split into a `begin_*` step that updates loading state and
/// returns a ticket, and a `finish_*` step that applies the response. A
/// response whose ticket is no longer current is dropped.
pub struct Dashboard<S: KeyValueStore> {
    pub view: ViewState,
    store: S,
    session_requests: RequestSequence,
    list_requests: RequestSequence,
    summary_requests: RequestSequence,
    /// Pair of the list request in flight.
    pending_list: Option<RepositorySelection>,
    /// Pair of the last list that loaded successfully.
    last_fetched: Option<RepositorySelection>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Create the dashboard and restore the remembered selection.
    pub fn new(store: S) -> Self {
        let view = ViewState {
            selection: RepositorySelection::restore(&store),
            ..ViewState::default()
        };
        Self {
            view,
            store,
            session_requests: RequestSequence::new(),
            list_requests: RequestSequence::new(),
            summary_requests: RequestSequence::new(),
            pending_list: None,
            last_fetched: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // Session guard

    /// Start an auth status check; only the newest check is applied.
    pub fn begin_session_check(&mut self) -> u64 {
        self.view.session.begin_check();
        self.session_requests.issue()
    }

    /// Apply the auth status; an authenticated session loads the restored selection.
    pub fn finish_session_check(
        &mut self,
        generation: u64,
        result: Result<bool>,
    ) -> Option<ListTicket> {
        if !self.session_requests.is_current(generation) {
            tracing::debug!(generation, "dropping stale auth status response");
            return None;
        }
        if let Err(e) = &result {
            tracing::warn!(error = %e, "auth status check failed");
        }
        if !self.view.session.resolve(&result) {
            tracing::info!("session is not authenticated");
            return None;
        }
        tracing::info!("session authenticated");
        self.last_fetched = None;
        self.selection_changed()
    }

    /// Reset everything after a logout request, whatever its outcome.
    pub fn finish_logout(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "logout request failed");
        }
        self.view = ViewState {
            session: SessionState::logged_out(),
            ..ViewState::default()
        };
        self.session_requests.invalidate();
        self.list_requests.invalidate();
        self.summary_requests.invalidate();
        self.pending_list = None;
        self.last_fetched = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear selection store");
        }
    }

    // Repository selector

    pub fn set_owner(&mut self, value: impl Into<String>) -> Option<ListTicket> {
        self.view.selection.set_owner(value);
        self.selection_changed()
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Option<ListTicket> {
        self.view.selection.set_name(value);
        self.selection_changed()
    }

    /// Load the list when the selection is complete and new.
    fn selection_changed(&mut self) -> Option<ListTicket> {
        if !self.view.session.is_active() {
            return None;
        }
        if let Some(pending) = &self.pending_list {
            if *pending == self.view.selection {
                return None;
            }
            self.abandon_list_fetch();
        }
        let intent = on_selection_changed(&self.view.selection, self.last_fetched.as_ref())?;
        self.begin_list_fetch(intent.selection)
    }

    /// Drop the list request in flight; its pair no longer matches the form.
    fn abandon_list_fetch(&mut self) {
        if let Some(pending) = self.pending_list.take() {
            tracing::debug!(repo = %pending.slug(), "abandoning workflow list request");
        }
        self.list_requests.invalidate();
        self.view.ui.is_loading_list = false;
    }

    // Workflow list

    /// Load the list for the current selection, even if it is unchanged.
    pub fn fetch_workflows(&mut self) -> Option<ListTicket> {
        let selection = self.view.selection.clone();
        self.begin_list_fetch(selection)
    }

    pub fn begin_list_fetch(&mut self, selection: RepositorySelection) -> Option<ListTicket> {
        if !selection.is_complete() {
            self.view.set_error(MSG_ENTER_OWNER_AND_REPO);
            return None;
        }

        self.view.ui.is_loading_list = true;
        self.view.clear_error();
        self.close_summary();

        let generation = self.list_requests.issue();
        tracing::debug!(generation, repo = %selection.slug(), "loading workflow runs");
        self.pending_list = Some(selection.clone());
        Some(ListTicket {
            generation,
            selection,
        })
    }

    /// Apply a list response. Returns false if the ticket was stale.
    pub fn finish_list_fetch(
        &mut self,
        ticket: ListTicket,
        result: Result<Vec<WorkflowRunRef>>,
    ) -> bool {
        if !self.list_requests.is_current(ticket.generation)
            || ticket.selection != self.view.selection
        {
            tracing::debug!(
                generation = ticket.generation,
                repo = %ticket.selection.slug(),
                "dropping stale workflow list response"
            );
            return false;
        }

        self.pending_list = None;
        self.view.ui.is_loading_list = false;

        match result {
            Ok(runs) => {
                tracing::info!(repo = %ticket.selection.slug(), runs = runs.len(), "loaded workflow runs");
                self.view.workflows.set_runs(runs);
                self.view.clear_error();
                if let Err(e) = ticket.selection.persist(&mut self.store) {
                    tracing::warn!(error = %e, "failed to remember selection");
                }
                self.last_fetched = Some(ticket.selection);
            }
            Err(e) => {
                tracing::warn!(repo = %ticket.selection.slug(), error = %e, "workflow list failed");
                self.view.workflows.clear();
                self.apply_failure(&e, list_error_message(&e));
            }
        }
        true
    }

    // Summary viewer

    /// Open the summary of the highlighted run.
    ///
    /// Nothing opens while the list is loading, since its rows are hidden.
    pub fn open_selected_run(&mut self) -> Option<SummaryTicket> {
        if self.view.ui.is_loading_list {
            return None;
        }
        let run_id = self.view.workflows.selected_run()?.id;
        let selection = self
            .last_fetched
            .clone()
            .unwrap_or_else(|| self.view.selection.clone());
        self.begin_summary_fetch(selection, run_id)
    }

    pub fn begin_summary_fetch(
        &mut self,
        selection: RepositorySelection,
        run_id: u64,
    ) -> Option<SummaryTicket> {
        if !self.view.session.is_active() {
            return None;
        }

        self.view.ui.is_loading_summary = true;
        self.view.clear_error();

        let generation = self.summary_requests.issue();
        tracing::debug!(generation, run_id, repo = %selection.slug(), "loading run summary");
        Some(SummaryTicket {
            generation,
            selection,
            run_id,
        })
    }

    /// Apply a summary response. Returns false if the ticket was stale.
    pub fn finish_summary_fetch(
        &mut self,
        ticket: SummaryTicket,
        result: Result<WorkflowDetail>,
    ) -> bool {
        if !self.summary_requests.is_current(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                run_id = ticket.run_id,
                "dropping stale summary response"
            );
            return false;
        }

        self.view.ui.is_loading_summary = false;

        match result {
            Ok(detail) => {
                tracing::info!(run_id = ticket.run_id, jobs = detail.jobs.len(), "loaded run summary");
                self.view.summary.detail = Some(detail);
            }
            Err(e) => {
                tracing::warn!(run_id = ticket.run_id, error = %e, "run summary failed");
                self.apply_failure(&e, summary_error_message(&e));
            }
        }
        true
    }

    /// Return to the list without reloading it.
    pub fn back(&mut self) {
        self.close_summary();
    }

    fn close_summary(&mut self) {
        self.view.summary.detail = None;
        self.view.ui.is_loading_summary = false;
        self.summary_requests.invalidate();
    }

    fn apply_failure(&mut self, error: &CinderError, message: String) {
        if matches!(error, CinderError::Unauthorized) {
            self.view.session.deauthenticate();
        }
        self.view.set_error(message);
    }
}
