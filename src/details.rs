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

//! Provider-neutral description of a check run.
//!
//! Callers build a [`ChecksDetails`] without knowing anything about GitHub;
//! [`crate::GitHubChecksDetails`] decides whether it can be published.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksStatus {
    #[default]
    None,
    Queued,
    InProgress,
    Completed,
}

impl FromStr for ChecksStatus {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "queued" => Ok(Self::Queued),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownValueError::new("status", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksConclusion {
    ActionRequired,
    Skipped,
    Cancelled,
    TimeOut,
    Failure,
    Neutral,
    Success,
}

impl FromStr for ChecksConclusion {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "action_required" => Ok(Self::ActionRequired),
            "skipped" => Ok(Self::Skipped),
            "cancelled" => Ok(Self::Cancelled),
            "timed_out" | "time_out" => Ok(Self::TimeOut),
            "failure" => Ok(Self::Failure),
            "neutral" => Ok(Self::Neutral),
            "success" => Ok(Self::Success),
            other => Err(UnknownValueError::new("conclusion", other)),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
#[error("Unknown {field}: {value}")]
pub struct UnknownValueError {
    field: &'static str,
    value: String,
}

impl UnknownValueError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksAnnotationLevel {
    Notice,
    Warning,
    Failure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChecksAnnotation {
    pub path: String,
    pub start_line: u64,
    pub end_line: u64,
    pub start_column: Option<u64>,
    pub end_column: Option<u64>,
    pub level: ChecksAnnotationLevel,
    pub message: String,
    pub title: Option<String>,
    pub raw_details: Option<String>,
}

impl ChecksAnnotation {
    pub fn new(
        path: impl Into<String>,
        line: u64,
        level: ChecksAnnotationLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            start_line: line,
            end_line: line,
            start_column: None,
            end_column: None,
            level,
            message: message.into(),
            title: None,
            raw_details: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChecksImage {
    pub alt: String,
    pub image_url: String,
    pub caption: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChecksOutput {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub text: Option<String>,
    pub annotations: Vec<ChecksAnnotation>,
    pub images: Vec<ChecksImage>,
}

impl ChecksOutput {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_annotation(mut self, annotation: ChecksAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_image(mut self, image: ChecksImage) -> Self {
        self.images.push(image);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChecksAction {
    pub label: String,
    pub description: String,
    pub identifier: String,
}

impl ChecksAction {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            identifier: identifier.into(),
        }
    }
}

/// Everything a caller can say about one check run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChecksDetails {
    pub name: Option<String>,
    pub status: ChecksStatus,
    pub conclusion: Option<ChecksConclusion>,
    pub details_url: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub output: Option<ChecksOutput>,
    pub actions: Vec<ChecksAction>,
}

impl ChecksDetails {
    pub fn new(name: impl Into<String>, status: ChecksStatus) -> Self {
        Self {
            name: Some(name.into()),
            status,
            ..Self::default()
        }
    }

    pub fn with_conclusion(mut self, conclusion: ChecksConclusion) -> Self {
        self.conclusion = Some(conclusion);
        self
    }

    pub fn with_details_url(mut self, url: impl Into<String>) -> Self {
        self.details_url = Some(url.into());
        self
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    pub fn with_output(mut self, output: ChecksOutput) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_action(mut self, action: ChecksAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_in_either_spelling() {
        assert_eq!("in_progress".parse::<ChecksStatus>().unwrap(), ChecksStatus::InProgress);
        assert_eq!("In-Progress".parse::<ChecksStatus>().unwrap(), ChecksStatus::InProgress);
        assert_eq!(" completed ".parse::<ChecksStatus>().unwrap(), ChecksStatus::Completed);
    }

    #[test]
    fn rejects_unknown_conclusion() {
        let err = "stale".parse::<ChecksConclusion>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown conclusion: stale");
    }

    #[test]
    fn builder_keeps_action_order() {
        let details = ChecksDetails::new("build", ChecksStatus::Queued)
            .with_action(ChecksAction::new("first", "one", "a"))
            .with_action(ChecksAction::new("second", "two", "b"));
        let labels: Vec<_> = details.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["first", "second"]);
        assert_eq!(details.conclusion, None);
    }
}
