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

//! Publishes check runs to GitHub.
//!
//! ```no_run
//! # async fn run() -> miette::Result<()> {
//! use github_checks_publisher::{ChecksDetails, ChecksStatus, GitHubChecksPublisher, PublishContext};
//!
//! let context = PublishContext::from_env()?;
//! let publisher = GitHubChecksPublisher::new(&context, None);
//! publisher
//!     .publish(&ChecksDetails::new("build", ChecksStatus::InProgress))
//!     .await;
//! # Ok(())
//! # }
//! ```

mod context;
mod details;
mod error;
mod github_details;
pub mod octocrab_extra;
mod publisher;
mod sink;

pub use context::{Credentials, PublishContext};
pub use details::{
    ChecksAction, ChecksAnnotation, ChecksAnnotationLevel, ChecksConclusion, ChecksDetails,
    ChecksImage, ChecksOutput, ChecksStatus, UnknownValueError,
};
pub use error::{ConfigError, PublishError};
pub use github_details::GitHubChecksDetails;
pub use publisher::{GitHubChecksPublisher, FAILURE_MESSAGE, GITHUB_URL};
pub use sink::{DiagnosticSink, LogSink, TracingLog};
