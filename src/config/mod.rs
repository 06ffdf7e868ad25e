// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gittty.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. <config dir>/gittty/gittty.toml
//! 3. gittty.toml (cwd)
//! 4. --ini FILE (repeatable)
//! 5. GITTTY_* env vars
//! 6. --set / command-line overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITTTY_GLOBAL__CLONE_DIR=/src     → global.clone_dir = "/src"
//! GITTTY_NETWORK__SKIP_PROBE=true   → network.skip_probe = true
//! GITTTY_CLONE__DEPTH=1             → clone.depth = 1
//! GITTTY_HOSTING__GITHUB_TOKEN=...  → hosting.github_token = "..."
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::history::History;
use crate::hosting::{HostingClient, Service};
use crate::workflow::CloneOptions;

use loader::ConfigLoader;
use types::{CloneConfig, GlobalConfig, HostingConfig, NetworkConfig};

/// File name looked up in the user config dir and the cwd.
pub const CONFIG_FILE: &str = "gittty.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GITTTY";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub network: NetworkConfig,
    pub clone: CloneConfig,
    pub hosting: HostingConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gittty::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gittty.toml")
    ///     .with_env_prefix("GITTTY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// `<config dir>/gittty/gittty.toml`, if the platform has a config dir.
    #[must_use]
    pub fn user_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gittty").join(CONFIG_FILE))
    }

    /// Rejects values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.clone.depth == Some(0) {
            return Err(invalid("clone", "depth", "must be a positive number"));
        }
        if self.network.probe_timeout_secs == 0 {
            return Err(invalid("network", "probe_timeout_secs", "must be greater than 0"));
        }
        if self.global.history_limit == 0 {
            return Err(invalid("global", "history_limit", "must be greater than 0"));
        }
        if self.network.probe_url.trim().is_empty() {
            return Err(invalid("network", "probe_url", "must not be empty"));
        }
        if !(1..=100).contains(&self.hosting.per_page) {
            return Err(invalid("hosting", "per_page", "must be between 1 and 100"));
        }
        Ok(())
    }

    /// Clone options from `[clone]` and `[global]`.
    #[must_use]
    pub fn clone_options(&self) -> CloneOptions {
        CloneOptions {
            branch: self.clone.branch.clone(),
            depth: self.clone.depth.and_then(NonZeroU32::new),
            post_clone_script: self.clone.post_clone_script.clone(),
            post_clone_policy: self.global.post_clone_failure,
        }
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.network.probe_timeout_secs)
    }

    /// API client for `service`, with the configured token or the
    /// service's usual environment variable.
    #[must_use]
    pub fn hosting_client(&self, service: Service) -> HostingClient {
        let (url, token, env) = match service {
            Service::GitHub => (&self.hosting.github_api_url, &self.hosting.github_token, "GITHUB_TOKEN"),
            Service::GitLab => (&self.hosting.gitlab_url, &self.hosting.gitlab_token, "GITLAB_TOKEN"),
        };
        let token = token.clone().or_else(|| std::env::var(env).ok());
        HostingClient::new(service, url, token)
    }

    /// Where the history lives, `None` if there is nowhere to put it.
    #[must_use]
    pub fn history_path(&self) -> Option<PathBuf> {
        self.global
            .history_file
            .clone()
            .or_else(History::default_path)
    }

    /// Format configuration options for display.
    ///
    /// One `key = value` line per option, sorted by key. Unset options are
    /// left out.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        if let Some(dir) = &self.global.clone_dir {
            options.insert("global.clone_dir", dir.display().to_string());
        }
        options.insert("global.progress", self.global.progress.as_str().to_string());
        options.insert(
            "global.post_clone_failure",
            self.global.post_clone_failure.as_str().to_string(),
        );
        if let Some(file) = self.history_path() {
            options.insert("global.history_file", file.display().to_string());
        }
        options.insert("global.history_limit", self.global.history_limit.to_string());
        options.insert("network.probe_url", self.network.probe_url.clone());
        options.insert(
            "network.probe_timeout_secs",
            self.network.probe_timeout_secs.to_string(),
        );
        options.insert("network.skip_probe", self.network.skip_probe.to_string());
        if let Some(depth) = self.clone.depth {
            options.insert("clone.depth", depth.to_string());
        }
        if let Some(branch) = &self.clone.branch {
            options.insert("clone.branch", branch.clone());
        }
        if let Some(script) = &self.clone.post_clone_script {
            options.insert("clone.post_clone_script", script.display().to_string());
        }
        options.insert("hosting.github_api_url", self.hosting.github_api_url.clone());
        options.insert("hosting.gitlab_url", self.hosting.gitlab_url.clone());
        options.insert("hosting.per_page", self.hosting.per_page.to_string());
        // Tokens are never echoed.
        if self.hosting.github_token.is_some() {
            options.insert("hosting.github_token", "<set>".to_string());
        }
        if self.hosting.gitlab_token.is_some() {
            options.insert("hosting.gitlab_token", "<set>".to_string());
        }

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
