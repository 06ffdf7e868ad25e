// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collaborators the orchestrator consults before and around git.
//!
//! ```text
//! FilesystemProbe     GixFilesystem   gix::open, refs/stash
//! ConnectivityProbe   net::HttpConnectivity (HEAD request)
//! ExecutableProbe     PathLookup      which("git"), cached
//! ConfirmationSource  StdinConfirm    [y/N] prompt
//!                     AutoConfirm     --yes
//! ```

use std::io::{BufRead, Write};
use std::path::Path;

use futures_util::future::BoxFuture;
use tracing::warn;

use crate::error::GitttyResult;
use crate::git::{cmd, query};

/// Filesystem and repository state.
pub trait FilesystemProbe: Send + Sync {
    /// `path` is the top of a git working tree.
    fn is_git_repository(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    /// Whether `refs/stash` holds at least one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn has_stash_entries(&self, path: &Path) -> GitttyResult<bool>;
}

/// Network reachability, used only as a hint.
pub trait ConnectivityProbe: Send + Sync {
    fn has_internet(&self) -> BoxFuture<'_, bool>;
}

/// Whether git can be started at all.
pub trait ExecutableProbe: Send + Sync {
    fn git_is_installed(&self) -> bool;
}

/// Yes/no decisions from the user.
pub trait ConfirmationSource: Send + Sync {
    fn confirm<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, bool>;
}

/// Filesystem probe backed by gix.
#[derive(Debug, Default, Clone, Copy)]
pub struct GixFilesystem;

impl FilesystemProbe for GixFilesystem {
    fn is_git_repository(&self, path: &Path) -> bool {
        query::is_git_repo(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn has_stash_entries(&self, path: &Path) -> GitttyResult<bool> {
        query::has_stashed_changes(path)
    }
}

/// Looks git up in PATH.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathLookup;

impl ExecutableProbe for PathLookup {
    fn git_is_installed(&self) -> bool {
        cmd::git_is_installed()
    }
}

/// Connectivity probe that never runs, for `--offline` and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeOnline;

impl ConnectivityProbe for AssumeOnline {
    fn has_internet(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { true })
    }
}

/// Answers every prompt with the same decision.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationSource for AutoConfirm {
    fn confirm<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, bool> {
        let answer = self.0;
        Box::pin(async move { answer })
    }
}

/// Asks on the terminal. Anything but `y`/`yes` (including EOF) is a no.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl ConfirmationSource for StdinConfirm {
    fn confirm<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, bool> {
        let prompt = prompt.to_string();
        Box::pin(async move {
            let answer = tokio::task::spawn_blocking(move || {
                let mut stderr = std::io::stderr().lock();
                let _ = write!(stderr, "{prompt} [y/N] ");
                let _ = stderr.flush();

                let mut line = String::new();
                std::io::stdin().lock().read_line(&mut line).map(|_| line)
            })
            .await;

            match answer {
                Ok(Ok(line)) => is_yes(&line),
                Ok(Err(e)) => {
                    warn!(error = %e, "failed to read confirmation, assuming no");
                    false
                }
                Err(e) => {
                    warn!(error = %e, "confirmation prompt task failed, assuming no");
                    false
                }
            }
        })
    }
}

/// Parses a `[y/N]` answer.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
