// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --log-file FILE   ← Also log to FILE (.json => JSON lines)
//! --progress MODE   ← global.progress override
//! --offline         ← network.skip_probe override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --ini > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::progress::render::ProgressMode;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// How to show git's progress.
    #[arg(long, value_name = "MODE")]
    pub progress: Option<ProgressMode>,

    /// Skips the connectivity check before cloning.
    #[arg(long)]
    pub offline: bool,

    /// Sets an option, such as 'clone.depth=1' or 'network/probe_url=https://example.com'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of config files, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(dotted key, value)` overrides.
    ///
    /// Dedicated flags come after `--set`, so they win.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a `--set` without `=` or
    /// without a `section.key` name.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let mut overrides = Vec::with_capacity(self.options.len() + 2);

        for option in &self.options {
            let parsed = option.split_once('=').and_then(|(key, value)| {
                let key = key.trim().replace('/', ".");
                let (section, name) = key.split_once('.')?;
                (!section.is_empty() && !name.is_empty()).then(|| (key.clone(), value.to_string()))
            });
            let Some(parsed) = parsed else {
                return Err(ConfigError::InvalidValue {
                    section: "cli".to_string(),
                    key: "set".to_string(),
                    message: format!("expected SECTION.KEY=VALUE, got '{option}'"),
                });
            };
            overrides.push(parsed);
        }

        if let Some(progress) = self.progress {
            overrides.push(("global.progress".to_string(), progress.as_str().to_string()));
        }

        if self.offline {
            overrides.push(("network.skip_probe".to_string(), "true".to_string()));
        }

        Ok(overrides)
    }
}
