// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and supervision of a spawned child.
//!
//! ```text
//! supervise()
//!   stdout/stderr reader tasks
//!     read chunks -> split on \r and \n -> OutputLine
//!       FORWARD_TO_LOG  trace!
//!       LIVE            unbounded channel -> ProcessHandle
//!       KEEP_IN_STRING  shared capture buffer
//!   wait (or cancel -> kill -> reap)
//!   drain readers (bounded, abort on timeout)
//!   --> ProcessOutput { exit_code, stdout, stderr, interrupted }
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::builder::{OutputLine, ProcessOutput, StreamFlags, StreamKind};
use crate::error::ProcessError;

/// How long to wait for pipes to close once the child has exited.
///
/// A grandchild that inherited the pipes can keep them open indefinitely.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Shared capture buffer for one stream.
type Capture = Arc<Mutex<String>>;

/// Configuration for one stream reader task.
pub(super) struct StreamReader {
    pub kind: StreamKind,
    pub flags: StreamFlags,
    pub process_name: String,
    pub live: Option<UnboundedSender<OutputLine>>,
}

/// Splits raw child output into lines.
///
/// Both `\n` and `\r` terminate a line, `\r\n` counts once, and a trailing
/// partial line is held back until more bytes (or EOF) arrive.
#[derive(Debug, Default)]
pub(super) struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Feeds a chunk and returns the complete non-empty lines it finished.
    pub(super) fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\n' || byte == b'\r' {
                self.flush_into(&mut lines);
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    /// Returns whatever is left after EOF.
    pub(super) fn finish(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        self.flush_into(&mut lines);
        lines.pop()
    }

    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if self.pending.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        lines.push(line);
    }
}

impl StreamReader {
    /// Spawns the reader task, returning the task and its capture buffer.
    pub(super) fn spawn<R>(self, reader: R) -> (JoinHandle<()>, Capture)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let capture = Capture::default();
        let sink = Arc::clone(&capture);
        let handle = tokio::spawn(async move { self.read(reader, &sink).await });
        (handle, capture)
    }

    async fn read<R>(self, mut reader: R, capture: &Mutex<String>)
    where
        R: AsyncRead + Unpin,
    {
        let mut splitter = LineSplitter::default();
        let mut buf = [0u8; 4096];

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    for line in splitter.feed(&buf[..n]) {
                        self.emit(line, capture);
                    }
                }
                Err(e) => {
                    warn!(
                        process = %self.process_name,
                        stream = self.kind.as_str(),
                        error = %e,
                        "error reading stream"
                    );
                    break;
                }
            }
        }

        if let Some(line) = splitter.finish() {
            self.emit(line, capture);
        }
    }

    fn emit(&self, text: String, capture: &Mutex<String>) {
        if self.flags.contains(StreamFlags::FORWARD_TO_LOG) {
            trace!(process = %self.process_name, stream = self.kind.as_str(), line = %text, "output");
        }
        if self.flags.contains(StreamFlags::KEEP_IN_STRING) {
            let mut captured = capture.lock().unwrap_or_else(PoisonError::into_inner);
            if !captured.is_empty() {
                captured.push('\n');
            }
            captured.push_str(&text);
        }
        if let Some(live) = &self.live {
            // The receiver is gone once the handle was dropped; keep draining anyway.
            let _ = live.send(OutputLine {
                stream: self.kind,
                text,
            });
        }
    }
}

/// One reader task and where its output lands.
pub(super) struct ReaderTask {
    pub handle: JoinHandle<()>,
    pub capture: Capture,
}

/// Waits for the child (or cancellation), then collects its output.
pub(super) async fn supervise(
    name: String,
    mut child: Child,
    stdout: Option<ReaderTask>,
    stderr: Option<ReaderTask>,
    token: CancellationToken,
) -> Result<ProcessOutput, ProcessError> {
    let (status, killed) = tokio::select! {
        status = child.wait() => (status, false),
        () = token.cancelled() => {
            warn!(process = %name, "cancellation requested, terminating process");
            terminate_process(&mut child).await;
            (child.wait().await, true)
        }
    };

    let status = status.map_err(|e| ProcessError::OutputError {
        command: name.clone(),
        message: e.to_string(),
    })?;

    let stdout = drain(&name, stdout).await;
    let stderr = drain(&name, stderr).await;

    // A child that died from the same signal that triggered cancellation
    // exits before the token fires.
    let interrupted = killed || (!status.success() && token.is_cancelled());

    Ok(ProcessOutput::new(
        status.code().unwrap_or(-1),
        stdout,
        stderr,
        interrupted,
    ))
}

/// Kills the child. Tokio reaps it on the following `wait()`.
async fn terminate_process(child: &mut Child) {
    if let Err(e) = child.kill().await {
        debug!(pid = ?child.id(), error = %e, "kill failed, process likely already exited");
    }
}

/// Waits for a reader to hit EOF, giving up after [`DRAIN_TIMEOUT`].
async fn drain(name: &str, task: Option<ReaderTask>) -> String {
    let Some(ReaderTask { mut handle, capture }) = task else {
        return String::new();
    };

    if tokio::time::timeout(DRAIN_TIMEOUT, &mut handle).await.is_err() {
        debug!(process = %name, "output pipe still open after exit, abandoning reader");
        handle.abort();
    }

    let mut captured = capture.lock().unwrap_or_else(PoisonError::into_inner);
    std::mem::take(&mut *captured)
}
