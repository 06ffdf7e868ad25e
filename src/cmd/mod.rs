// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   clone, pull, history, config, repos
//!
//! clone/pull: build_orchestrator(config) -> Orchestrator -> OperationResult
//!             -> report() -> Ok / Err(remediation)
//! ```

pub mod clone;
pub mod config;
pub mod history;
pub mod pull;
pub mod repos;

use anyhow::anyhow;
use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::history::History;
use crate::net::HttpConnectivity;
use crate::progress::render::ProgressDisplay;
use crate::workflow::probe::{AutoConfirm, ConfirmationSource, GixFilesystem, PathLookup, StdinConfirm};
use crate::workflow::{OperationResult, Orchestrator, ShellGit, StashState, Subcommand};

/// Wires the real collaborators together.
#[must_use]
pub fn build_orchestrator(config: &Config, assume_yes: bool) -> Orchestrator {
    let confirmation: Box<dyn ConfirmationSource> = if assume_yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    Orchestrator::builder()
        .executor(Box::new(ShellGit))
        .filesystem(Box::new(GixFilesystem))
        .connectivity(Box::new(HttpConnectivity::new(
            config.network.probe_url.clone(),
            config.probe_timeout(),
        )))
        .executables(Box::new(PathLookup))
        .confirmation(confirmation)
        .progress(Box::new(ProgressDisplay::new(config.global.progress)))
        .skip_connectivity_probe(config.network.skip_probe)
        .build()
}

/// Lines describing `result` for the user, most important first.
#[must_use]
pub fn report_lines(result: &OperationResult) -> Vec<String> {
    let mut lines = Vec::new();
    let path = result.path().display();

    if result.cancelled() {
        lines.push(format!("{} of '{path}' cancelled", result.subcommand()));
    } else if result.success() {
        let verb = match result.subcommand() {
            Subcommand::Clone => "cloned",
            _ => "updated",
        };
        lines.push(format!("{verb} '{path}' in {:.1?}", result.elapsed()));
    } else {
        lines.push(format!("{} of '{path}' failed", result.subcommand()));
    }

    if let Some(report) = result.auto_stash() {
        match report.state() {
            StashState::Resolved => lines.push("local changes were stashed and reapplied".into()),
            StashState::Declined => lines.push("auto-stash declined, nothing was changed".into()),
            StashState::Aborted => lines.push("git stash failed, nothing was changed".into()),
            state => lines.push(format!("auto-stash ended in state: {state}")),
        }
        match report.stash_retained() {
            Some(true) => lines.push("a stash entry is still present (see `git stash list`)".into()),
            Some(false) => lines.push("no stash entry remains".into()),
            None => {}
        }
    }

    if let Some(script) = result.post_clone() {
        let status = match (script.success, script.exit_code) {
            (true, _) => "succeeded".to_string(),
            (false, Some(code)) => format!("failed with exit code {code}"),
            (false, None) => "did not run to completion".to_string(),
        };
        lines.push(format!("post-clone script '{}' {status}", script.script.display()));
        if !script.success && !script.output.trim().is_empty() {
            lines.push(script.output.trim().to_string());
        }
    }

    if let Some(hint) = result.remediation() {
        lines.push(hint.to_string());
    }
    lines
}

/// Prints `result` and turns a failure into an error for the exit code.
///
/// # Errors
///
/// Returns an error if the operation did not succeed.
pub fn report(result: &OperationResult) -> Result<()> {
    let mut lines = report_lines(result).into_iter();
    if let Some(headline) = lines.next() {
        if result.success() {
            println!("{headline}");
        } else {
            eprintln!("{headline}");
        }
    }
    for line in lines {
        eprintln!("{line}");
    }

    if result.success() {
        return Ok(());
    }
    match result.error() {
        Some(error) => Err(anyhow!("{}", error.kind())),
        None if result.cancelled() => Err(anyhow!("cancelled")),
        None => Err(anyhow!("{} did not complete", result.subcommand())),
    }
}

/// Remembers a successful clone. History problems never fail the command.
pub fn remember_clone(config: &Config, url: &str, result: &OperationResult) {
    if !result.success() {
        return;
    }
    let Some(file) = config.history_path() else {
        return;
    };

    let path = std::path::absolute(result.path()).unwrap_or_else(|_| result.path().to_path_buf());
    let outcome = History::load(&file).and_then(|mut history| {
        history.record(url, &path, config.global.history_limit);
        history.save(&file)
    });
    if let Err(e) = outcome {
        warn!(error = %e, "could not update history");
    }
}
