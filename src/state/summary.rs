// Run summary state.
// Holds the detail for one run and the formatting used to display it.

use crate::api::{JobDetail, WorkflowDetail};
use crate::error::{CinderError, ErrorKind};

use super::selection::RepositorySelection;

pub const MSG_LOADING_SUMMARY: &str = "Loading summary";

/// Identifies one issued summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTicket {
    pub generation: u64,
    pub selection: RepositorySelection,
    pub run_id: u64,
}

/// Detail for the run being viewed, if any.
#[derive(Debug, Default)]
pub struct SummaryState {
    pub detail: Option<WorkflowDetail>,
}

/// User-facing message for a failed summary request.
pub fn summary_error_message(error: &CinderError) -> String {
    match error.kind() {
        ErrorKind::AuthRequired => "Session expired. Please login again.".to_string(),
        ErrorKind::NotFound => "Workflow not found".to_string(),
        _ if error.is_transport() => error.to_string(),
        _ => "Failed to fetch summary".to_string(),
    }
}

/// Format seconds as `"{m}m {s}s"` or `"{s}s"`; zero renders as a dash.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "—".to_string();
    }
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Carbon estimate in grams with three decimals, or `N/A`.
pub fn format_carbon(grams: Option<f64>) -> String {
    match grams {
        Some(grams) => format!("{:.3}", grams),
        None => "N/A".to_string(),
    }
}

/// Duration column for a job row.
pub fn job_duration_label(job: &JobDetail) -> String {
    if job.in_progress {
        "Running...".to_string()
    } else {
        format_duration(job.duration_seconds)
    }
}
