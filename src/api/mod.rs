// Backend API module.
// Provides the client, the API seam used by the dashboard, and response types.

pub mod client;
pub mod endpoints;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::BackendClient;
pub use types::*;

/// Calls the dashboard makes against the backend.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Whether the ambient session is authenticated.
    async fn auth_status(&self) -> Result<bool>;

    /// Invalidate the session on the backend.
    async fn logout(&self) -> Result<()>;

    /// Recent workflow runs for a repository, newest first.
    async fn list_workflow_runs(&self, owner: &str, repo: &str) -> Result<Vec<WorkflowRunRef>>;

    /// Job breakdown and carbon estimate for one run.
    async fn workflow_summary(&self, owner: &str, repo: &str, run_id: u64)
    -> Result<WorkflowDetail>;
}
