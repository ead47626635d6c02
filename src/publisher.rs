// Copyright 2022 Alexander Krivács Schrøder
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// OR
//
// Licensed under the MIT License. See LICENSE-MIT for details.

use crate::context::{Credentials, PublishContext};
use crate::details::ChecksDetails;
use crate::error::PublishError;
use crate::github_details::GitHubChecksDetails;
use crate::octocrab_extra::checks::{CheckHandler, CreateCheckRunBuilder};
use crate::octocrab_extra::models::checks::CheckRunStatus;
use crate::octocrab_extra::OctocrabExt;
use crate::sink::{DiagnosticSink, LogSink, TracingLog};
use chrono::Utc;
use octocrab::{Octocrab, OctocrabBuilder};
use regex::Regex;

pub const GITHUB_URL: &str = "https://api.github.com";
pub const FAILURE_MESSAGE: &str = "Failed Publishing GitHub checks: ";

/// Publishes check runs to GitHub.
///
/// Publishing is best effort: [`publish`](Self::publish) never fails, it
/// reports problems to the listener and the process log instead.
pub struct GitHubChecksPublisher<'a> {
    context: &'a PublishContext,
    listener: Option<&'a dyn DiagnosticSink>,
    log: &'a dyn LogSink,
    github_url: String,
}

impl<'a> GitHubChecksPublisher<'a> {
    pub fn new(context: &'a PublishContext, listener: Option<&'a dyn DiagnosticSink>) -> Self {
        Self::with_log(context, listener, &TracingLog)
    }

    pub fn with_log(
        context: &'a PublishContext,
        listener: Option<&'a dyn DiagnosticSink>,
        log: &'a dyn LogSink,
    ) -> Self {
        Self {
            context,
            listener,
            log,
            github_url: GITHUB_URL.to_owned(),
        }
    }

    /// API URL used when the credentials don't name one.
    pub fn with_github_url(mut self, github_url: impl Into<String>) -> Self {
        self.github_url = github_url.into();
        self
    }

    pub async fn publish(&self, details: &ChecksDetails) {
        match self.try_publish(details).await {
            Ok((name, status)) => {
                if let Some(listener) = self.listener {
                    listener.write_line(&format!(
                        "GitHub check (name: {name}, status: {status}) has been published."
                    ));
                }
            }
            Err(e) => {
                let cause = error_chain(&e);
                self.log.warn(&single_line(&format!(
                    "{FAILURE_MESSAGE}{details:?} {cause}"
                )));
                if let Some(listener) = self.listener {
                    listener.write_line(&single_line(&format!("{FAILURE_MESSAGE}{cause}")));
                }
            }
        }
    }

    async fn try_publish(
        &self,
        details: &ChecksDetails,
    ) -> Result<(String, CheckRunStatus), PublishError> {
        let credentials = self.context.credentials()?;
        let github = self.connect(credentials)?;
        let github_details = GitHubChecksDetails::new(details)?;

        let (owner, repo) = self.context.repository_parts()?;
        let checks = github.check_runs(owner, repo);
        let run = self
            .create_builder(&checks, &github_details)?
            .send()
            .await
            .map_err(PublishError::Submit)?;
        tracing::debug!(id = run.id, html_url = ?run.html_url, "check run created");

        Ok((github_details.name().to_owned(), github_details.status()))
    }

    fn connect(&self, credentials: &Credentials) -> Result<Octocrab, PublishError> {
        let url = credentials.resolve_api_uri(&self.github_url);
        let connect_error = |source| PublishError::Connect {
            url: url.to_owned(),
            source,
        };

        OctocrabBuilder::new()
            .base_uri(url)
            .map_err(connect_error)?
            .user_access_token(credentials.token().to_owned())
            .build()
            .map_err(connect_error)
    }

    /// Maps `details` onto a check run creation request without sending it.
    pub fn create_builder<'o, 'h>(
        &self,
        checks: &'h CheckHandler<'o>,
        details: &GitHubChecksDetails<'_>,
    ) -> Result<CreateCheckRunBuilder<'o, 'h>, PublishError> {
        let mut builder = checks
            .create_check_run(details.name(), self.context.head_sha())
            .status(details.status())
            .details_url(details.details_url().unwrap_or(self.context.url()))
            .started_at(details.started_at().unwrap_or_else(Utc::now));

        if let Some(conclusion) = details.conclusion() {
            builder = builder
                .conclusion(conclusion)
                .completed_at(details.completed_at().unwrap_or_else(Utc::now));
        }

        if let Some(output) = details.output()? {
            builder = builder.output(output);
        }
        for action in details.actions() {
            builder = builder.action(action);
        }

        Ok(builder)
    }
}

/// Joins the messages of `error` and its sources. Only the first line of
/// each message is kept; octocrab appends backtraces after it.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut chain = headline(error);
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&headline(cause));
        source = cause.source();
    }
    chain
}

fn headline(error: &dyn std::error::Error) -> String {
    let message = error.to_string();
    message.lines().next().unwrap_or_default().trim_end().to_owned()
}

fn single_line(message: &str) -> String {
    LINE_BREAK_REGEX.with(|r| r.replace_all(message, "").into_owned())
}

thread_local! {
    static LINE_BREAK_REGEX: Regex = Regex::new(r"[\r\n]").unwrap();
}
