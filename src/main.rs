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

use github_checks_publisher::{
    ChecksConclusion, ChecksDetails, ChecksOutput, ChecksStatus, ConfigError,
    GitHubChecksPublisher, PublishContext,
};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let context = PublishContext::from_env()?;
    let details = details_from_lookup(|key| std::env::var(key).ok())?;

    let console = Mutex::new(std::io::stdout());
    GitHubChecksPublisher::new(&context, Some(&console))
        .publish(&details)
        .await;

    Ok(())
}

fn details_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ChecksDetails, ConfigError> {
    let input = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let name = input("INPUT_NAME").ok_or(ConfigError::MissingVariable("INPUT_NAME"))?;
    let status = match input("INPUT_STATUS") {
        Some(status) => status.parse()?,
        None => ChecksStatus::Completed,
    };
    let mut details = ChecksDetails::new(name, status);

    if let Some(conclusion) = input("INPUT_CONCLUSION") {
        details = details.with_conclusion(conclusion.parse::<ChecksConclusion>()?);
    }
    if let Some(url) = input("INPUT_DETAILS_URL") {
        details = details.with_details_url(url);
    }
    match (input("INPUT_TITLE"), input("INPUT_SUMMARY")) {
        (Some(title), Some(summary)) => {
            let mut output = ChecksOutput::new(title, summary);
            if let Some(text) = input("INPUT_TEXT") {
                output = output.with_text(text);
            }
            details = details.with_output(output);
        }
        (Some(_), None) => {
            return Err(ConfigError::IncompleteOutput("INPUT_TITLE", "INPUT_SUMMARY"))
        }
        (None, Some(_)) => {
            return Err(ConfigError::IncompleteOutput("INPUT_SUMMARY", "INPUT_TITLE"))
        }
        (None, None) => {}
    }

    Ok(details)
}
