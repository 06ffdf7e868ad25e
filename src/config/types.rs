// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]   clone_dir, progress, post_clone_failure, history_file, history_limit
//! [network]  probe_url, probe_timeout_secs, skip_probe
//! [clone]    depth, branch, post_clone_script
//! [hosting]  github_api_url, gitlab_url, github_token, gitlab_token, per_page
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::history::DEFAULT_LIMIT;
use crate::hosting::{DEFAULT_PER_PAGE, GITHUB_API_URL, GITLAB_URL};
use crate::net::{DEFAULT_PROBE_TIMEOUT, DEFAULT_PROBE_URL};
use crate::progress::render::ProgressMode;
use crate::workflow::PostClonePolicy;

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Parent directory for clones given no explicit path (default: cwd).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_dir: Option<PathBuf>,
    /// Progress display strategy.
    pub progress: ProgressMode,
    /// What a failing post-clone script does to the clone's result.
    pub post_clone_failure: PostClonePolicy,
    /// History file (default: `<config dir>/gittty/history.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
    /// Maximum number of remembered repositories.
    pub history_limit: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            clone_dir: None,
            progress: ProgressMode::default(),
            post_clone_failure: PostClonePolicy::default(),
            history_file: None,
            history_limit: DEFAULT_LIMIT,
        }
    }
}

/// Connectivity probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub probe_url: String,
    pub probe_timeout_secs: u64,
    /// Never probe; clone failures are classified from git's output alone.
    pub skip_probe: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT.as_secs(),
            skip_probe: false,
        }
    }
}

/// Defaults for `clone`; command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    /// Shallow clone depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Script run inside every fresh clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_clone_script: Option<PathBuf>,
}

/// GitHub and GitLab access for `repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostingConfig {
    /// GitHub REST root; change it for GitHub Enterprise.
    pub github_api_url: String,
    /// GitLab instance.
    pub gitlab_url: String,
    /// Falls back to `GITHUB_TOKEN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    /// Falls back to `GITLAB_TOKEN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_token: Option<String>,
    /// Repositories listed per request.
    pub per_page: u8,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            github_api_url: GITHUB_API_URL.to_string(),
            gitlab_url: GITLAB_URL.to_string(),
            github_token: None,
            gitlab_token: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
