// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull command implementation for gittty.

use tokio_util::sync::CancellationToken;

use super::{build_orchestrator, remember_clone, report};
use crate::cli::pull::PullArgs;
use crate::config::Config;
use crate::error::Result;
use crate::workflow::CloneFallback;

/// Main handler for the pull command.
///
/// # Errors
///
/// Returns an error if the pull (or the clone it turned into) fails.
pub async fn run_pull_command(
    args: &PullArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let fallback = args.url.as_ref().map(|url| CloneFallback {
        url: url.clone(),
        options: config.clone_options(),
    });

    let orchestrator = build_orchestrator(config, args.yes);
    let result = orchestrator.pull(&args.path, fallback.as_ref(), cancel).await;

    if let Some(fallback) = fallback.as_ref().filter(|_| result.routed_to_clone()) {
        remember_clone(config, &fallback.url, &result);
    }
    report(&result)
}
