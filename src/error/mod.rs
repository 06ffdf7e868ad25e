// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          GitttyError (16 bytes)
//!                   |
//!   +------+------+-+------+------+
//!   |      |      |        |      |
//!   v      v      v        v      v
//!  Git  Process Config  History   Io
//!  Box    Box    Box      Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      Gix, DestinationNotEmpty, UnnamedRemote
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit, OutputError
//!   Config   InvalidValue
//!   History  Read, Parse, Write
//!
//! StashError (standalone): InvalidTransition
//! HostingError (standalone): Unauthorized, Forbidden, RateLimited,
//!                            NotFound, Status, Request, Decode
//!
//! All variants boxed => GitttyError is one pointer plus a tag.
//! ```
//!
//! Failures of git itself (non-zero exit) are not errors here: they are
//! classified into an `ErrorKind` and carried inside an `OperationResult`.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GitttyError`].
pub type GitttyResult<T> = std::result::Result<T, GitttyError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at 16 bytes on the stack.
#[derive(Debug, Error)]
pub enum GitttyError {
    /// Git repository inspection failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Repository history error.
    #[error("history error: {0}")]
    History(#[from] Box<HistoryError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GitttyError {
                fn from(err: $error) -> Self {
                    GitttyError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    HistoryError => History,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to look up a reference.
    #[error("failed to find reference: {0}")]
    Reference(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Repository inspection errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Clone destination exists, is not empty and is not a repository.
    #[error("destination '{path}' already exists and is not an empty directory")]
    DestinationNotEmpty { path: String },

    /// Could not derive a repository name from a remote URL.
    #[error("cannot derive a directory name from '{url}'")]
    UnnamedRemote { url: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Failed to wait on the process or read its output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

impl ProcessError {
    /// Returns true if the process never started.
    #[must_use]
    pub const fn is_spawn_error(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::SpawnFailed { .. }
        )
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- History Errors ---

/// Repository history persistence errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Failed to read the history file.
    #[error("failed to read history file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// History file is not valid JSON.
    #[error("failed to parse history file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the history file.
    #[error("failed to write history file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Hosting Errors ---

/// GitHub and GitLab API errors.
#[derive(Debug, Error)]
pub enum HostingError {
    /// The token is missing, expired or wrong.
    #[error("authentication failed; check the token for this service")]
    Unauthorized,

    /// The token lacks a scope the request needs.
    #[error("access forbidden; check the token's permissions")]
    Forbidden,

    /// Too many requests for this token or address.
    #[error("rate limit exceeded; try again later")]
    RateLimited,

    /// The endpoint does not exist, e.g. a wrong GitLab URL.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("http error {status}: {url}")]
    Status { status: u16, url: String },

    /// No response: DNS, connection or timeout.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response was not the expected JSON.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// --- Auto-Stash Errors ---

/// Auto-stash state machine misuse.
///
/// Not part of [`GitttyError`]: a failing cycle is reported through the
/// operation result, this only signals an event the current state rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StashError {
    /// The event is not valid in the current state.
    #[error("auto-stash cannot handle '{event}' while {from}")]
    InvalidTransition { from: String, event: String },
}

#[cfg(test)]
mod tests;
