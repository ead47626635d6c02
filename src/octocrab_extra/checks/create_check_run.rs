use crate::octocrab_extra::models::checks::{
    CheckRun, CheckRunAction, CheckRunConclusion, CheckRunOutputArgument, CheckRunStatus,
};

/// Request body of `POST /repos/{owner}/{repo}/check-runs`.
///
/// The builder serializes to exactly the JSON GitHub receives, so unset
/// optional fields never reach the wire.
#[derive(serde::Serialize)]
pub struct CreateCheckRunBuilder<'octo, 'r> {
    #[serde(skip)]
    handler: &'r super::CheckHandler<'octo>,
    name: String,
    head_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<CheckRunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conclusion: Option<CheckRunConclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CheckRunOutputArgument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<CheckRunAction>,
}

impl<'octo, 'r> CreateCheckRunBuilder<'octo, 'r> {
    pub(crate) fn new(
        handler: &'r super::CheckHandler<'octo>,
        name: String,
        head_sha: String,
    ) -> Self {
        Self {
            handler,
            name,
            head_sha,
            details_url: None,
            status: None,
            started_at: None,
            conclusion: None,
            completed_at: None,
            output: None,
            actions: Vec::new(),
        }
    }

    /// The URL of the integrator's site that has the full details of the
    /// check. If the integrator does not provide this, then the homepage of
    /// the GitHub app is used.
    pub fn details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(details_url.into());
        self
    }

    /// The current status.
    /// Default: [`CheckRunStatus::Queued`]
    pub fn status(mut self, status: impl Into<CheckRunStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn started_at(mut self, started_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.started_at = Some(started_at.into());
        self
    }

    /// The final conclusion of the check. **Required if you provide
    /// [`completed_at`](Self::completed_at) or a status of
    /// [`CheckRunStatus::Completed`]**.
    /// Providing a conclusion makes GitHub set the status to completed.
    pub fn conclusion(mut self, conclusion: impl Into<CheckRunConclusion>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    pub fn completed_at(mut self, completed_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.completed_at = Some(completed_at.into());
        self
    }

    /// Check runs can accept a variety of data in the `output` object,
    /// including a `title` and `summary` and can optionally provide
    /// descriptive details about the run.
    pub fn output(mut self, output: impl Into<CheckRunOutputArgument>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Appends a button to the check run. Buttons show up in the order they
    /// were added. GitHub accepts at most three.
    pub fn action(mut self, action: CheckRunAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Send the actual request.
    pub async fn send(self) -> octocrab::Result<CheckRun> {
        let route = self.handler.route();
        tracing::debug!(%route, name = %self.name, "creating check run");

        self.handler.crab.post(route, Some(&self)).await
    }
}
