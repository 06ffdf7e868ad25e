// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process description and its finished output.
//!
//! ```text
//! ProcessBuilder
//!   new(program) | which(program) | raw(shell line) | script(file)
//!   arg/args  cwd  env  name  flag
//!   capture_output()  KEEP_IN_STRING on both pipes
//!   live_lines()      LIVE on both pipes
//!
//! ProcessOutput { exit_code, stdout, stderr, interrupted, pending }
//! ```

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::ProcessError;

bitflags! {
    /// How a finished process is judged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// A non-zero exit is returned as output instead of `NonZeroExit`.
        const ALLOW_FAILURE = 0x01;
    }
}

bitflags! {
    /// What happens to each line read from stdout or stderr.
    ///
    /// An empty set discards the pipe.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u32 {
        /// `trace!` every line.
        const FORWARD_TO_LOG = 0x01;
        /// Collect into `ProcessOutput`.
        const KEEP_IN_STRING = 0x02;
        /// Hand each line to the `ProcessHandle` line stream.
        const LIVE = 0x04;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Which pipe a line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// One line of child output.
///
/// Lines are split on both `\n` and `\r`, so every carriage-return update
/// of a progress meter arrives as its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: StreamKind,
    pub text: String,
}

/// What a process left behind once it exited or was killed.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
    interrupted: bool,
    pending: Vec<OutputLine>,
}

impl ProcessOutput {
    pub(super) const fn new(
        exit_code: i32,
        stdout: String,
        stderr: String,
        interrupted: bool,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            interrupted,
            pending: Vec::new(),
        }
    }

    pub(super) fn with_pending(mut self, pending: Vec<OutputLine>) -> Self {
        self.pending = pending;
        self
    }

    pub(super) fn interrupted(mut self) -> Self {
        self.interrupted = true;
        self
    }

    /// Exit code; `-1` when the process was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Collected stdout, empty unless `KEEP_IN_STRING` was set.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Collected stderr, empty unless `KEEP_IN_STRING` was set.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Stdout then stderr. Git writes progress and errors to stderr, so
    /// this is what classification looks at.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (true, _) => self.stderr.clone(),
            (false, true) => self.stdout.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }

    /// Killed through its handle or a parent token.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Live lines nobody took from the handle's line stream.
    #[must_use]
    pub fn pending(&self) -> &[OutputLine] {
        &self.pending
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.interrupted
    }
}

/// PATH lookups already done, keyed by program name.
fn resolved_programs() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    static RESOLVED: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();
    RESOLVED.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Everything needed to start one child process.
#[derive(Debug)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    /// Added on top of the inherited environment.
    envs: Vec<(String, String)>,
    flags: ProcessFlags,
    stdout: StreamFlags,
    stderr: StreamFlags,
    name: Option<String>,
}

impl ProcessBuilder {
    /// A bare program name is looked up in PATH at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            flags: ProcessFlags::empty(),
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            name: None,
        }
    }

    /// Resolves `program` in PATH up front.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it is not in PATH.
    #[cfg(test)]
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    #[must_use]
    pub fn exists(program: &str) -> bool {
        Self::find(program).is_some()
    }

    /// Full path of `program` in PATH. Hits are remembered for the life of
    /// the process; misses are retried.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let known = resolved_programs()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
            .cloned();
        if known.is_some() {
            return known;
        }

        let path = which::which(program).ok()?;
        resolved_programs()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    /// A shell command line: `/bin/sh -c` on Unix, `pwsh -Command` on Windows.
    #[cfg(test)]
    pub fn raw(command: impl Into<String>) -> Self {
        let line = command.into();
        if cfg!(windows) {
            Self::new("pwsh").args(["-NoProfile", "-NonInteractive", "-Command", &line])
        } else {
            Self::new("/bin/sh").args(["-c", &line])
        }
    }

    /// Runs a script file through the platform shell, so it does not need
    /// its executable bit set.
    pub fn script(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| "script".to_string(), |n| n.to_string_lossy().into_owned());
        let shell = if cfg!(windows) {
            Self::new("pwsh").args(["-NoProfile", "-NonInteractive", "-File"])
        } else {
            Self::new("/bin/sh")
        };
        shell.arg(path).name(name)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, |builder, arg| builder.arg(arg))
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Keeps both pipes for `ProcessOutput`.
    #[must_use]
    pub const fn capture_output(mut self) -> Self {
        self.stdout = self.stdout.union(StreamFlags::KEEP_IN_STRING);
        self.stderr = self.stderr.union(StreamFlags::KEEP_IN_STRING);
        self
    }

    /// Streams both pipes line by line through the handle.
    #[must_use]
    pub const fn live_lines(mut self) -> Self {
        self.stdout = self.stdout.union(StreamFlags::LIVE);
        self.stderr = self.stderr.union(StreamFlags::LIVE);
        self
    }

    /// Name used in log lines and errors instead of the program stem.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub(super) fn env_vars(&self) -> &[(String, String)] {
        &self.envs
    }

    pub(super) const fn process_flags(&self) -> ProcessFlags {
        self.flags
    }

    pub(super) const fn stream_flags(&self, kind: StreamKind) -> StreamFlags {
        match kind {
            StreamKind::Stdout => self.stdout,
            StreamKind::Stderr => self.stderr,
        }
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
