// Backend endpoint functions.
// Provides typed calls for the auth, workflow list, and run summary endpoints.

use async_trait::async_trait;
use reqwest::Url;

use crate::error::Result;

use super::DashboardApi;
use super::client::{BackendClient, map_transport};
use super::types::{
    AuthStatus, WorkflowDetail, WorkflowRunRef, WorkflowRunsResponse, WorkflowSummaryResponse,
};

impl BackendClient {
    /// URL the user opens in a browser to start the OAuth flow.
    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(&["auth", "github", "login"])
    }
}

#[async_trait]
impl DashboardApi for BackendClient {
    async fn auth_status(&self) -> Result<bool> {
        let response = self.get(&["auth", "github", "status"]).await?;
        let status: AuthStatus = response.json().await.map_err(map_transport)?;
        Ok(status.authenticated)
    }

    async fn logout(&self) -> Result<()> {
        self.post(&["auth", "github", "logout"]).await?;
        Ok(())
    }

    async fn list_workflow_runs(&self, owner: &str, repo: &str) -> Result<Vec<WorkflowRunRef>> {
        let response = self.get(&["github", owner, repo, "workflows"]).await?;
        let wrapper: WorkflowRunsResponse = response.json().await.map_err(map_transport)?;
        Ok(wrapper.workflow_runs)
    }

    async fn workflow_summary(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<WorkflowDetail> {
        let run_id = run_id.to_string();
        let response = self
            .get(&["github", owner, repo, "workflows", run_id.as_str(), "summary"])
            .await?;
        let summary: WorkflowSummaryResponse = response.json().await.map_err(map_transport)?;
        Ok(WorkflowDetail::from(summary))
    }
}
