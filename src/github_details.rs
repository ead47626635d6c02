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

use crate::details::{
    ChecksAnnotation, ChecksAnnotationLevel, ChecksConclusion, ChecksDetails, ChecksImage,
    ChecksOutput, ChecksStatus,
};
use crate::error::PublishError;
use crate::octocrab_extra::models::checks::{
    AnnotationLevel, CheckRunAction, CheckRunAnnotation, CheckRunConclusion, CheckRunImage,
    CheckRunOutputArgument, CheckRunStatus,
};
use chrono::{DateTime, Utc};

/// [`ChecksDetails`] checked against what GitHub accepts.
#[derive(Clone, Debug)]
pub struct GitHubChecksDetails<'d> {
    details: &'d ChecksDetails,
    name: &'d str,
    status: CheckRunStatus,
}

impl<'d> GitHubChecksDetails<'d> {
    pub fn new(details: &'d ChecksDetails) -> Result<Self, PublishError> {
        let name = details
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| PublishError::InvalidDetails("check name is blank".into()))?;
        let status = match details.status {
            ChecksStatus::None => {
                return Err(PublishError::InvalidDetails(
                    "status NONE is not a valid GitHub status".into(),
                ))
            }
            ChecksStatus::Queued => CheckRunStatus::Queued,
            ChecksStatus::InProgress => CheckRunStatus::InProgress,
            ChecksStatus::Completed => CheckRunStatus::Completed,
        };
        if let Some(url) = &details.details_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(PublishError::InvalidDetails(format!(
                    "details url '{url}' is not http or https"
                )));
            }
        }

        Ok(Self {
            details,
            name,
            status,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn status(&self) -> CheckRunStatus {
        self.status
    }

    pub fn conclusion(&self) -> Option<CheckRunConclusion> {
        self.details.conclusion.map(|c| match c {
            ChecksConclusion::ActionRequired => CheckRunConclusion::ActionRequired,
            ChecksConclusion::Skipped => CheckRunConclusion::Skipped,
            ChecksConclusion::Cancelled => CheckRunConclusion::Cancelled,
            ChecksConclusion::TimeOut => CheckRunConclusion::TimedOut,
            ChecksConclusion::Failure => CheckRunConclusion::Failure,
            ChecksConclusion::Neutral => CheckRunConclusion::Neutral,
            ChecksConclusion::Success => CheckRunConclusion::Success,
        })
    }

    pub fn details_url(&self) -> Option<&str> {
        self.details.details_url.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.details.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.details.completed_at
    }

    pub fn output(&self) -> Result<Option<CheckRunOutputArgument>, PublishError> {
        self.details.output.as_ref().map(convert_output).transpose()
    }

    pub fn actions(&self) -> impl Iterator<Item = CheckRunAction> + '_ {
        self.details.actions.iter().map(|a| CheckRunAction {
            label: a.label.clone(),
            description: a.description.clone(),
            identifier: a.identifier.clone(),
        })
    }
}

fn convert_output(output: &ChecksOutput) -> Result<CheckRunOutputArgument, PublishError> {
    let title = output
        .title
        .clone()
        .ok_or_else(|| PublishError::InvalidDetails("output title is required".into()))?;
    let summary = output
        .summary
        .clone()
        .ok_or_else(|| PublishError::InvalidDetails("output summary is required".into()))?;

    Ok(CheckRunOutputArgument {
        title,
        summary,
        text: output.text.clone(),
        annotations: output.annotations.iter().map(convert_annotation).collect(),
        images: output.images.iter().map(convert_image).collect(),
    })
}

fn convert_annotation(annotation: &ChecksAnnotation) -> CheckRunAnnotation {
    // GitHub refuses columns on annotations spanning several lines.
    let single_line = annotation.start_line == annotation.end_line;
    CheckRunAnnotation {
        path: annotation.path.clone(),
        start_line: annotation.start_line,
        end_line: annotation.end_line,
        start_column: annotation.start_column.filter(|_| single_line),
        end_column: annotation.end_column.filter(|_| single_line),
        annotation_level: match annotation.level {
            ChecksAnnotationLevel::Notice => AnnotationLevel::Notice,
            ChecksAnnotationLevel::Warning => AnnotationLevel::Warning,
            ChecksAnnotationLevel::Failure => AnnotationLevel::Failure,
        },
        message: annotation.message.clone(),
        title: annotation.title.clone(),
        raw_details: annotation.raw_details.clone(),
    }
}

fn convert_image(image: &ChecksImage) -> CheckRunImage {
    CheckRunImage {
        alt: image.alt.clone(),
        image_url: image.image_url.clone(),
        caption: image.caption.clone(),
    }
}
