// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runs git for an [`Operation`] and relays its progress.
//!
//! ```text
//! ShellGit::execute(op, sink, cancel)
//!   git().args(op.args()).capture_output().live_lines()
//!     .spawn_with_cancellation(cancel)
//!   take_lines() -> progress_events() -> sink.on_event()   (until pipes close)
//!   wait() -> ExecOutcome { exit_code, output, cancelled }
//! ```

use std::path::Path;
use std::pin::pin;

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::Operation;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::ProcessError;
use crate::git::cmd::git;
use crate::progress::{ProgressSink, progress_events};

/// How a finished process ended.
///
/// A non-zero exit is a normal outcome here, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub exit_code: i32,
    /// stdout followed by stderr.
    pub output: String,
    pub cancelled: bool,
}

impl ExecOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.cancelled
    }

    /// Whether this run ended because of `cancel`. A git killed by the
    /// terminal's SIGINT can exit before the token fires, so a failed run
    /// under a cancelled token counts too.
    #[must_use]
    pub fn stopped_by(&self, cancel: &CancellationToken) -> bool {
        self.cancelled || (self.exit_code != 0 && cancel.is_cancelled())
    }
}

impl From<ProcessOutput> for ExecOutcome {
    fn from(output: ProcessOutput) -> Self {
        Self {
            exit_code: output.exit_code(),
            output: output.combined(),
            cancelled: output.is_interrupted(),
        }
    }
}

/// Executes git and scripts on behalf of the orchestrator.
pub trait GitExecutor: Send + Sync {
    /// Runs `op` to completion, feeding progress to `sink`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` only if git could not be started or
    /// supervised; git's own failures come back as an `ExecOutcome`.
    fn execute<'a>(
        &'a self,
        op: &'a Operation,
        sink: &'a dyn ProgressSink,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<ExecOutcome, ProcessError>>;

    /// Runs a script in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the script could not be started.
    fn run_script<'a>(
        &'a self,
        script: &'a Path,
        cwd: &'a Path,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<ExecOutcome, ProcessError>>;
}

/// The real thing: `git` from PATH.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellGit;

impl GitExecutor for ShellGit {
    fn execute<'a>(
        &'a self,
        op: &'a Operation,
        sink: &'a dyn ProgressSink,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<ExecOutcome, ProcessError>> {
        Box::pin(async move {
            let mut builder = git().args(op.args()).capture_output().live_lines();
            if let Some(dir) = op.working_dir() {
                builder = builder.cwd(dir);
            }

            let mut handle = builder.spawn_with_cancellation(cancel)?;
            sink.begin(&op.title());

            if let Some(lines) = handle.take_lines() {
                let mut events = pin!(progress_events(lines.map(|line| line.text)));
                while let Some(event) = events.next().await {
                    sink.on_event(&event);
                }
            }

            let output = handle.wait().await?;
            sink.finish(output.success());
            debug!(
                op = %op.subcommand(),
                exit_code = output.exit_code(),
                interrupted = output.is_interrupted(),
                "git finished"
            );
            Ok(output.into())
        })
    }

    fn run_script<'a>(
        &'a self,
        script: &'a Path,
        cwd: &'a Path,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<ExecOutcome, ProcessError>> {
        Box::pin(async move {
            ProcessBuilder::script(script)
                .cwd(cwd)
                .flag(ProcessFlags::ALLOW_FAILURE)
                .capture_output()
                .run_with_cancellation(cancel)
                .await
                .map(ExecOutcome::from)
        })
    }
}
