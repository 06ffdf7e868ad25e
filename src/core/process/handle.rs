// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handle to a running child process.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::builder::{OutputLine, ProcessOutput};
use crate::error::ProcessError;

/// Live output of a process, one item per line as it is written.
///
/// The stream ends once both pipes have closed.
#[derive(Debug)]
pub struct LineStream {
    rx: UnboundedReceiver<OutputLine>,
}

impl Stream for LineStream {
    type Item = OutputLine;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// A spawned process.
///
/// Dropping the handle does not stop the process; call [`cancel`](Self::cancel)
/// or cancel the parent token for that.
#[derive(Debug)]
pub struct ProcessHandle {
    name: String,
    pid: Option<u32>,
    token: CancellationToken,
    lines: Option<UnboundedReceiver<OutputLine>>,
    completion: JoinHandle<Result<ProcessOutput, ProcessError>>,
}

impl ProcessHandle {
    pub(super) const fn new(
        name: String,
        pid: Option<u32>,
        token: CancellationToken,
        lines: Option<UnboundedReceiver<OutputLine>>,
        completion: JoinHandle<Result<ProcessOutput, ProcessError>>,
    ) -> Self {
        Self {
            name,
            pid,
            token,
            lines,
            completion,
        }
    }

    /// Display name of the process.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS process id, if the process was still running when spawned.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Requests termination. Idempotent, and harmless after exit.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Takes the live line stream.
    ///
    /// Returns `None` if no stream was configured with `LIVE` or it was
    /// already taken.
    pub fn take_lines(&mut self) -> Option<LineStream> {
        self.lines.take().map(|rx| LineStream { rx })
    }

    /// Waits for the process to exit and its output to be collected.
    ///
    /// Live lines nobody consumed are returned in [`ProcessOutput::pending`].
    /// A failed exit counts as interrupted once the token is cancelled, so
    /// a child killed by a terminal signal ahead of the token still reports
    /// as cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::OutputError` if waiting on the child failed or
    /// the supervising task panicked.
    pub async fn wait(self) -> Result<ProcessOutput, ProcessError> {
        let output = self
            .completion
            .await
            .map_err(|e| ProcessError::OutputError {
                command: self.name.clone(),
                message: e.to_string(),
            })??;

        let pending = self.lines.map_or_else(Vec::new, |mut rx| {
            let mut pending = Vec::new();
            while let Ok(line) = rx.try_recv() {
                pending.push(line);
            }
            pending
        });

        let output = output.with_pending(pending);
        if !output.success() && self.token.is_cancelled() {
            Ok(output.interrupted())
        } else {
            Ok(output)
        }
    }
}
