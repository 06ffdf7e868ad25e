// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! spawn() / spawn_with_cancellation(parent)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio, kill_on_drop,
//!     own process group (unix)
//!              |
//!              v
//!       Command::spawn()
//!     NotFound -> ExecutableNotFound
//!     other    -> SpawnFailed
//!              |
//!              v
//!   reader tasks + supervise() task
//!              |
//!              v
//!        ProcessHandle
//!
//! run() / run_with_cancellation(parent)
//!   spawn -> wait -> validate exit code (skip if ALLOW_FAILURE or interrupted)
//! ```

use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags, StreamKind};
use super::handle::ProcessHandle;
use super::io::{ReaderTask, StreamReader, supervise};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.arguments() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and returns immediately.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the program does not
    /// exist, or `ProcessError::SpawnFailed` for any other spawn failure.
    pub fn spawn(self) -> Result<ProcessHandle, ProcessError> {
        self.spawn_with_cancellation(&CancellationToken::new())
    }

    /// Spawns the process under a child of `parent`.
    ///
    /// Cancelling `parent` terminates this process; cancelling the handle
    /// does not touch `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`spawn`](Self::spawn).
    pub fn spawn_with_cancellation(
        self,
        parent: &CancellationToken,
    ) -> Result<ProcessHandle, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source: e,
                }
            }
        })?;

        let pid = child.id();
        trace!(process = %name, pid = ?pid, "spawned");

        let wants_live = (self.stream_flags(StreamKind::Stdout) | self.stream_flags(StreamKind::Stderr)).contains(StreamFlags::LIVE);
        let (live_tx, live_rx) = if wants_live {
            let (tx, rx) = mpsc::unbounded_channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let reader = |kind: StreamKind, flags: StreamFlags| StreamReader {
            kind,
            flags,
            process_name: name.clone(),
            live: live_tx
                .as_ref()
                .filter(|_| flags.contains(StreamFlags::LIVE))
                .cloned(),
        };

        let stdout = child.stdout.take().map(|pipe| {
            let (handle, capture) = reader(StreamKind::Stdout, self.stream_flags(StreamKind::Stdout)).spawn(pipe);
            ReaderTask { handle, capture }
        });
        let stderr = child.stderr.take().map(|pipe| {
            let (handle, capture) = reader(StreamKind::Stderr, self.stream_flags(StreamKind::Stderr)).spawn(pipe);
            ReaderTask { handle, capture }
        });
        // Only the readers may hold senders, so the stream ends at EOF.
        drop(live_tx);

        let token = parent.child_token();
        let completion = tokio::spawn(supervise(
            name.clone(),
            child,
            stdout,
            stderr,
            token.clone(),
        ));

        Ok(ProcessHandle::new(name, pid, token, live_rx, completion))
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// This is the main entry point for executing a process.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits non-zero and `ALLOW_FAILURE` is not set.
    pub async fn run(self) -> Result<ProcessOutput, ProcessError> {
        self.run_with_cancellation(&CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When `parent` is cancelled the process is killed and the output comes
    /// back with `interrupted = true`, never as an exit-code error.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_with_cancellation(
        self,
        parent: &CancellationToken,
    ) -> Result<ProcessOutput, ProcessError> {
        if parent.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        let name = self.display_name();
        let allow_failure = self.process_flags().contains(ProcessFlags::ALLOW_FAILURE);

        let output = self.spawn_with_cancellation(parent)?.wait().await?;

        if !output.is_interrupted() && !allow_failure && output.exit_code() != 0 {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            });
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.arguments());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.env_vars() {
            command.env(key, value);
        }

        // Nothing we run may block on a prompt.
        command.stdin(Stdio::null());
        command.stdout(Self::stdio_for(self.stream_flags(StreamKind::Stdout)));
        command.stderr(Self::stdio_for(self.stream_flags(StreamKind::Stderr)));

        command.kill_on_drop(true);

        // Keep terminal signals away from the child; only the token stops it.
        #[cfg(unix)]
        command.process_group(0);

        command
    }

    /// A pipe nobody reads goes to the null device.
    fn stdio_for(flags: StreamFlags) -> Stdio {
        if flags.is_empty() {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
