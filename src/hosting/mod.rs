// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository listings from GitHub and GitLab.
//!
//! ```text
//! HostingClient::new(service, api_url, token)
//!   current_user()      GET /user                          (both)
//!   repositories(n)     GitHub  GET /user/repos?sort=updated&direction=desc
//!                       GitLab  GET /api/v4/projects?owned=true&order_by=updated_at
//!
//! 401 -> Unauthorized   403 "rate limit" / 429 -> RateLimited
//! 403 -> Forbidden      404 -> NotFound         other -> Status
//! ```
//!
//! Both services are mapped onto one [`RemoteRepository`] shape so the
//! clone URLs can be fed straight back into `clone`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HostingError;
use crate::net::global_client;

/// GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitLab instance used when none is configured.
pub const GITLAB_URL: &str = "https://gitlab.com";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Entries asked for when nothing else is configured.
pub const DEFAULT_PER_PAGE: u8 = 30;

/// A code hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    #[value(name = "github")]
    GitHub,
    #[value(name = "gitlab")]
    GitLab,
}

impl Service {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostingUser {
    pub login: String,
    pub name: Option<String>,
}

/// One repository as either service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRepository {
    pub name: String,
    /// `owner/name`, or the full namespace path on GitLab.
    pub full_name: String,
    pub description: Option<String>,
    pub https_url: String,
    pub ssh_url: String,
    pub private: bool,
    pub default_branch: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitLabUser {
    username: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    full_name: String,
    description: Option<String>,
    clone_url: String,
    ssh_url: String,
    private: bool,
    default_branch: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitLabProject {
    name: String,
    path_with_namespace: String,
    description: Option<String>,
    http_url_to_repo: String,
    ssh_url_to_repo: String,
    visibility: Option<String>,
    default_branch: Option<String>,
    last_activity_at: Option<DateTime<Utc>>,
}

impl From<GitHubRepo> for RemoteRepository {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description.filter(|d| !d.is_empty()),
            https_url: repo.clone_url,
            ssh_url: repo.ssh_url,
            private: repo.private,
            default_branch: repo.default_branch,
            updated_at: repo.updated_at,
        }
    }
}

impl From<GitLabProject> for RemoteRepository {
    fn from(project: GitLabProject) -> Self {
        Self {
            name: project.name,
            full_name: project.path_with_namespace,
            description: project.description.filter(|d| !d.is_empty()),
            https_url: project.http_url_to_repo,
            ssh_url: project.ssh_url_to_repo,
            // GitLab leaves `visibility` out for restricted tokens.
            private: project.visibility.as_deref().is_none_or(|v| v == "private"),
            default_branch: project.default_branch,
            updated_at: project.last_activity_at,
        }
    }
}

/// Read-only client for one hosting service.
#[derive(Debug, Clone)]
pub struct HostingClient {
    service: Service,
    api_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HostingClient {
    /// `base_url` is the REST root for GitHub and the instance root for
    /// GitLab (`/api/v4` is appended).
    #[must_use]
    pub fn new(service: Service, base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let api_url = match service {
            Service::GitHub => base_url.to_string(),
            Service::GitLab => format!("{base_url}/api/v4"),
        };
        Self {
            service,
            api_url,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn service(&self) -> Service {
        self.service
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Who the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns a `HostingError` if the request fails or is refused.
    pub async fn current_user(&self) -> Result<HostingUser, HostingError> {
        let url = format!("{}/user", self.api_url);
        Ok(match self.service {
            Service::GitHub => {
                let user: GitHubUser = self.get_json(&url).await?;
                HostingUser {
                    login: user.login,
                    name: user.name,
                }
            }
            Service::GitLab => {
                let user: GitLabUser = self.get_json(&url).await?;
                HostingUser {
                    login: user.username,
                    name: user.name,
                }
            }
        })
    }

    /// Repositories of the token's owner, most recently updated first.
    ///
    /// `per_page` is clamped to what both services accept (1 to 100).
    ///
    /// # Errors
    ///
    /// Returns a `HostingError` if the request fails or is refused.
    pub async fn repositories(&self, per_page: u8) -> Result<Vec<RemoteRepository>, HostingError> {
        let per_page = per_page.clamp(1, 100);
        let repos = match self.service {
            Service::GitHub => {
                let url = format!(
                    "{}/user/repos?per_page={per_page}&type=all&sort=updated&direction=desc",
                    self.api_url
                );
                self.get_json::<Vec<GitHubRepo>>(&url)
                    .await?
                    .into_iter()
                    .map(RemoteRepository::from)
                    .collect::<Vec<_>>()
            }
            Service::GitLab => {
                let url = format!(
                    "{}/projects?per_page={per_page}&owned=true&order_by=updated_at&sort=desc",
                    self.api_url
                );
                self.get_json::<Vec<GitLabProject>>(&url)
                    .await?
                    .into_iter()
                    .map(RemoteRepository::from)
                    .collect()
            }
        };
        debug!(service = %self.service, count = repos.len(), "repositories listed");
        Ok(repos)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HostingError> {
        debug!(service = %self.service, url, "hosting request");

        let mut request = global_client().get(url).timeout(self.timeout);
        request = match self.service {
            Service::GitHub => request.header("Accept", "application/vnd.github.v3+json"),
            Service::GitLab => request.header("Accept", "application/json"),
        };
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|source| HostingError::Request {
            url: url.to_string(),
            source,
        })?;
        let response = check_status(response, url).await?;

        response.json::<T>().await.map_err(|source| HostingError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

async fn check_status(response: Response, url: &str) -> Result<Response, HostingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(url, status = status.as_u16(), body = %body, "hosting request refused");
    Err(match status {
        StatusCode::UNAUTHORIZED => HostingError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => HostingError::RateLimited,
        StatusCode::FORBIDDEN if body.to_lowercase().contains("rate limit") => {
            HostingError::RateLimited
        }
        StatusCode::FORBIDDEN => HostingError::Forbidden,
        StatusCode::NOT_FOUND => HostingError::NotFound {
            url: url.to_string(),
        },
        other => HostingError::Status {
            status: other.as_u16(),
            url: url.to_string(),
        },
    })
}
