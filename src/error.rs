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

use miette::Diagnostic;
use thiserror::Error;

/// Any reason a check run did not get published. The publisher handles all
/// of these the same way.
#[derive(Error, Diagnostic, Debug)]
pub enum PublishError {
    #[error("no GitHub credentials configured for this context")]
    #[diagnostic(help("set INPUT_TOKEN or GITHUB_TOKEN"))]
    MissingCredentials,

    #[error("invalid repository identifier '{0}', expected 'owner/name'")]
    InvalidRepository(String),

    #[error("could not connect to GitHub at {url}")]
    Connect {
        url: String,
        #[source]
        source: octocrab::Error,
    },

    #[error("invalid check details: {0}")]
    InvalidDetails(String),

    #[error("GitHub rejected the check run")]
    Submit(#[source] octocrab::Error),
}

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("`{0}` environment variable missing")]
    MissingVariable(&'static str),

    #[error("`{0}` is set but `{1}` is not")]
    #[diagnostic(help("a check run output needs both a title and a summary"))]
    IncompleteOutput(&'static str, &'static str),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidValue(#[from] crate::details::UnknownValueError),
}
