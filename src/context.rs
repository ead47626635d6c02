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

use crate::error::{ConfigError, PublishError};
use std::fmt;

/// A GitHub access token and, optionally, the API it belongs to.
#[derive(Clone)]
pub struct Credentials {
    api_uri: Option<String>,
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_uri: None,
            token: token.into(),
        }
    }

    pub fn with_api_uri(mut self, api_uri: impl Into<String>) -> Self {
        self.api_uri = Some(api_uri.into());
        self
    }

    pub fn api_uri(&self) -> Option<&str> {
        self.api_uri.as_deref()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The API URL to talk to. Blank or missing URLs fall back to `default`,
    /// which lets the same credentials work for github.com and Enterprise.
    pub fn resolve_api_uri<'a>(&'a self, default: &'a str) -> &'a str {
        match self.api_uri.as_deref() {
            Some(uri) if !uri.trim().is_empty() => uri,
            _ => default,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_uri", &self.api_uri)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Where a check run goes: repository, commit and the build it belongs to.
#[derive(Clone, Debug)]
pub struct PublishContext {
    repository: String,
    head_sha: String,
    url: String,
    credentials: Option<Credentials>,
}

impl PublishContext {
    pub fn new(
        repository: impl Into<String>,
        head_sha: impl Into<String>,
        url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            repository: repository.into(),
            head_sha: head_sha.into(),
            url: url.into(),
            credentials,
        }
    }

    /// Reads the context a GitHub Actions job runs in.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVariable(key));

        let repository = required("GITHUB_REPOSITORY")?;
        let head_sha = required("GITHUB_SHA")?;
        let server = lookup("GITHUB_SERVER_URL").unwrap_or_else(|| "https://github.com".into());
        let url = match lookup("GITHUB_RUN_ID") {
            Some(run_id) => format!(
                "{}/{}/actions/runs/{}",
                server.trim_end_matches('/'),
                repository,
                run_id
            ),
            None => format!("{}/{}", server.trim_end_matches('/'), repository),
        };

        let credentials = lookup("INPUT_TOKEN")
            .filter(|t| !t.is_empty())
            .or_else(|| lookup("GITHUB_TOKEN"))
            .map(|token| {
                let credentials = Credentials::new(token);
                match lookup("GITHUB_API_URL") {
                    Some(api) => credentials.with_api_uri(api),
                    None => credentials,
                }
            });

        Ok(Self::new(repository, head_sha, url, credentials))
    }

    /// `owner/name` split in two.
    pub fn repository_parts(&self) -> Result<(&str, &str), PublishError> {
        match self.repository.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok((owner, name))
            }
            _ => Err(PublishError::InvalidRepository(self.repository.clone())),
        }
    }

    pub fn head_sha(&self) -> &str {
        &self.head_sha
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn credentials(&self) -> Result<&Credentials, PublishError> {
        self.credentials
            .as_ref()
            .ok_or(PublishError::MissingCredentials)
    }
}
