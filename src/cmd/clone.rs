// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command implementation for gittty.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{build_orchestrator, remember_clone, report};
use crate::cli::clone::CloneArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::discovery::{Destination, resolve_destination};
use crate::history::History;

/// Main handler for the clone command.
///
/// A destination that already holds the repository is pulled instead.
///
/// # Errors
///
/// Returns an error if the destination is unusable, the history entry does
/// not exist, or the operation fails.
pub async fn run_clone_command(
    args: &CloneArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let (url, path) = match args.from_history {
        Some(number) => {
            let file = config
                .history_path()
                .ok_or_else(|| anyhow!("no config directory; set global.history_file"))?;
            let history = History::load(&file)?;
            pick_from_history(&history, number)?
        }
        None => (
            args.url.clone().context("a repository URL is required")?,
            args.path.clone(),
        ),
    };

    let base = match &config.global.clone_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let destination = resolve_destination(&url, path.as_deref(), &base)?;
    let orchestrator = build_orchestrator(config, args.yes);

    let result = match &destination {
        Destination::Fresh(path) => {
            let options = args.clone_options(config);
            let result = orchestrator.clone(&url, path, &options, cancel).await;
            remember_clone(config, &url, &result);
            result
        }
        Destination::Existing(path) => {
            info!(path = %path.display(), "already cloned, pulling instead");
            orchestrator.pull(path, None, cancel).await
        }
    };
    report(&result)
}

/// URL and destination of entry `number` as `gittty history` lists it.
///
/// # Errors
///
/// Returns an error naming the valid range if there is no such entry.
pub fn pick_from_history(history: &History, number: NonZeroUsize) -> Result<(String, Option<PathBuf>)> {
    let entry = history.get(number).ok_or_else(|| match history.entries().len() {
        0 => anyhow!("no repositories cloned yet"),
        len => anyhow!("no history entry {number}; pick 1 to {len}"),
    })?;
    info!(url = %entry.url, path = %entry.path.display(), "reusing history entry {number}");
    Ok((entry.url.clone(), Some(entry.path.clone())))
}
