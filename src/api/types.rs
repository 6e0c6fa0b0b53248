// Backend API response types.
// Defines structs for deserializing the dashboard backend's JSON responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session status returned by the auth endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
}

/// Workflow run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Waiting,
    Requested,
    Pending,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Waiting => "waiting",
            RunStatus::Requested => "requested",
            RunStatus::Pending => "pending",
            RunStatus::Unknown => "unknown",
        }
    }
}

/// One entry of the recent-runs list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRunRef {
    pub id: u64,
    pub name: Option<String>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    /// Run duration in seconds. Absent while the backend has no timing yet.
    #[serde(default, rename = "run_duration")]
    pub run_duration_seconds: Option<f64>,
}

impl WorkflowRunRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed workflow)")
    }

    pub fn duration_seconds(&self) -> f64 {
        self.run_duration_seconds
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(0.0)
    }
}

/// Response wrapper for the workflow runs list.
#[derive(Debug, Deserialize)]
pub struct WorkflowRunsResponse {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRunRef>,
}

/// Job entry as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    pub job_id: u64,
    pub name: String,
    pub runner: Option<String>,
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub in_progress: bool,
}

/// Summary body as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummaryResponse {
    pub workflow_run_id: u64,
    #[serde(default)]
    pub total_jobs: u64,
    pub total_duration_seconds: Option<f64>,
    pub carbon: Option<f64>,
    pub jobs: Option<Vec<JobDetailResponse>>,
}

/// A job within a workflow run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDetail {
    pub job_id: u64,
    pub name: String,
    pub runner: String,
    pub duration_seconds: f64,
    pub in_progress: bool,
}

impl From<JobDetailResponse> for JobDetail {
    fn from(job: JobDetailResponse) -> Self {
        Self {
            job_id: job.job_id,
            name: job.name,
            runner: job.runner.unwrap_or_else(|| "unknown".to_string()),
            duration_seconds: job.duration_seconds.unwrap_or(0.0),
            in_progress: job.in_progress,
        }
    }
}

/// Per-run summary with job breakdown and carbon estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDetail {
    pub workflow_run_id: u64,
    pub total_jobs: u64,
    pub total_duration_seconds: f64,
    /// Estimated emissions in grams of CO2, passed through from the backend.
    pub carbon_grams: Option<f64>,
    pub jobs: Vec<JobDetail>,
}

impl From<WorkflowSummaryResponse> for WorkflowDetail {
    fn from(summary: WorkflowSummaryResponse) -> Self {
        Self {
            workflow_run_id: summary.workflow_run_id,
            total_jobs: summary.total_jobs,
            total_duration_seconds: summary.total_duration_seconds.unwrap_or(0.0),
            carbon_grams: summary.carbon,
            jobs: summary
                .jobs
                .unwrap_or_default()
                .into_iter()
                .map(JobDetail::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runs_response() {
        let body = r#"{
            "workflow_runs": [
                {"id": 1, "name": "CI", "status": "completed",
                 "created_at": "2024-05-01T10:00:00Z", "run_duration": 125},
                {"id": 2, "name": null, "status": "action_required",
                 "created_at": "2024-05-01T09:00:00Z"}
            ]
        }"#;
        let parsed: WorkflowRunsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.workflow_runs.len(), 2);

        let first = &parsed.workflow_runs[0];
        assert_eq!(first.status, RunStatus::Completed);
        assert_eq!(first.duration_seconds(), 125.0);

        let second = &parsed.workflow_runs[1];
        assert_eq!(second.status, RunStatus::Unknown);
        assert_eq!(second.display_name(), "(unnamed workflow)");
        assert_eq!(second.duration_seconds(), 0.0);
    }

    #[test]
    fn test_summary_without_jobs_or_carbon() {
        let body = r#"{"workflowRunId": 42, "totalJobs": 0, "totalDurationSeconds": 0}"#;
        let parsed: WorkflowSummaryResponse = serde_json::from_str(body).unwrap();
        let detail = WorkflowDetail::from(parsed);

        assert_eq!(detail.workflow_run_id, 42);
        assert!(detail.jobs.is_empty());
        assert!(detail.carbon_grams.is_none());
    }

    #[test]
    fn test_summary_with_jobs() {
        let body = r#"{
            "workflowRunId": 7,
            "totalJobs": 2,
            "totalDurationSeconds": 300,
            "carbon": 1.23456,
            "jobs": [
                {"jobId": 70, "name": "build", "runner": "ubuntu-latest",
                 "durationSeconds": 200, "inProgress": false},
                {"jobId": 71, "name": "test", "runner": null, "inProgress": true}
            ]
        }"#;
        let detail = WorkflowDetail::from(
            serde_json::from_str::<WorkflowSummaryResponse>(body).unwrap(),
        );

        assert_eq!(detail.carbon_grams, Some(1.23456));
        assert_eq!(detail.jobs.len(), 2);
        assert_eq!(detail.jobs[0].runner, "ubuntu-latest");
        assert_eq!(detail.jobs[1].runner, "unknown");
        assert!(detail.jobs[1].in_progress);
        assert_eq!(detail.jobs[1].duration_seconds, 0.0);
    }
}
