use octocrab::Octocrab;

mod create_check_run;

pub use create_check_run::CreateCheckRunBuilder;

pub struct CheckHandler<'octo> {
    crab: &'octo Octocrab,
    owner: String,
    repo: String,
}

impl<'octo> CheckHandler<'octo> {
    pub(crate) fn new(crab: &'octo Octocrab, owner: String, repo: String) -> Self {
        Self { crab, owner, repo }
    }

    pub fn create_check_run(
        &self,
        name: impl Into<String>,
        head_sha: impl Into<String>,
    ) -> CreateCheckRunBuilder<'octo, '_> {
        CreateCheckRunBuilder::new(self, name.into(), head_sha.into())
    }

    fn route(&self) -> String {
        format!(
            "/repos/{owner}/{repo}/check-runs",
            owner = self.owner,
            repo = self.repo,
        )
    }
}
