// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Maps a finished git process to an actionable error kind.
//!
//! ```text
//! classify(exit_code, output, hint)
//!   exit 0                       -> None (success)
//!   hint Offline                 -> NetworkUnreachable
//!   first matching rule in RULES -> kind
//!       NetworkUnreachable
//!       AuthenticationFailed
//!       RepositoryNotFound
//!       LocalChangesWouldBeOverwritten   (auto-stash trigger)
//!       NonFastForward
//!   nothing matched              -> Unclassified, advice = output
//!
//! classify_spawn_error(err)      -> GitNotInstalled
//! ```
//!
//! Matching is case-insensitive substring search over stdout and stderr.
//! Git runs under `LC_ALL=C`, so the messages are the English ones.
//! Classification is pure: identical input always yields identical output.

use std::fmt;

use serde::Serialize;

use crate::error::ProcessError;

/// Actionable category of a git failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NetworkUnreachable,
    AuthenticationFailed,
    RepositoryNotFound,
    NonFastForward,
    LocalChangesWouldBeOverwritten,
    GitNotInstalled,
    Unclassified,
}

impl ErrorKind {
    /// Fixed, human-readable remediation.
    #[must_use]
    pub const fn remediation(self) -> &'static str {
        match self {
            Self::NetworkUnreachable => {
                "Could not reach the remote. Check your internet connection and the host name, then try again."
            }
            Self::AuthenticationFailed => {
                "Authentication failed. Check your credentials or SSH key and that you have access to this repository."
            }
            Self::RepositoryNotFound => {
                "Repository not found. Check the URL; private repositories also report this when you lack access."
            }
            Self::NonFastForward => {
                "Local and remote history have diverged. Merge or rebase manually, then pull again."
            }
            Self::LocalChangesWouldBeOverwritten => {
                "Local changes would be overwritten. Commit or stash them, then pull again."
            }
            Self::GitNotInstalled => "git was not found. Install git and make sure it is in your PATH.",
            Self::Unclassified => "git failed; see its output for details.",
        }
    }

    /// Whether this failure is recovered by the auto-stash cycle.
    #[must_use]
    pub const fn triggers_auto_stash(self) -> bool {
        matches!(self, Self::LocalChangesWouldBeOverwritten)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkUnreachable => "network unreachable",
            Self::AuthenticationFailed => "authentication failed",
            Self::RepositoryNotFound => "repository not found",
            Self::NonFastForward => "non-fast-forward",
            Self::LocalChangesWouldBeOverwritten => "local changes would be overwritten",
            Self::GitNotInstalled => "git not installed",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-flight connectivity knowledge passed into classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityHint {
    /// The probe did not run.
    #[default]
    Unchecked,
    Online,
    Offline,
}

impl From<bool> for ConnectivityHint {
    fn from(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }
}

/// A classified failure: the kind plus the advice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    kind: ErrorKind,
    advice: String,
}

impl Classification {
    /// A classification with advice specific to the situation.
    pub(crate) fn new(kind: ErrorKind, advice: impl Into<String>) -> Self {
        Self {
            kind,
            advice: advice.into(),
        }
    }

    fn fixed(kind: ErrorKind) -> Self {
        Self {
            kind,
            advice: kind.remediation().to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Remediation text, or git's own output for `Unclassified`.
    #[must_use]
    pub fn advice(&self) -> &str {
        &self.advice
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.advice)
    }
}

struct Rule {
    kind: ErrorKind,
    /// Lowercase substrings; any one matching selects `kind`.
    patterns: &'static [&'static str],
}

/// Evaluated top to bottom, first match wins.
static RULES: [Rule; 5] = [
    Rule {
        kind: ErrorKind::NetworkUnreachable,
        patterns: &[
            "could not resolve host",
            "could not resolve hostname",
            "temporary failure in name resolution",
            "name or service not known",
            "connection timed out",
            "operation timed out",
            "failed to connect to",
            "connection refused",
            "network is unreachable",
        ],
    },
    Rule {
        kind: ErrorKind::AuthenticationFailed,
        patterns: &[
            "authentication failed",
            // ssh transport and hosted remotes, not local filesystem errors
            "permission denied (publickey",
            " denied to ",
            "could not read username",
            "could not read password",
            "invalid username or password",
            "returned error: 403",
            "returned error: 401",
            "host key verification failed",
        ],
    },
    Rule {
        kind: ErrorKind::RepositoryNotFound,
        patterns: &[
            "repository not found",
            "does not appear to be a git repository",
            "returned error: 404",
            "does not exist",
        ],
    },
    Rule {
        kind: ErrorKind::LocalChangesWouldBeOverwritten,
        patterns: &[
            "your local changes to the following files would be overwritten",
            "please commit your changes or stash them",
            "cannot pull with rebase: you have unstaged changes",
        ],
    },
    Rule {
        kind: ErrorKind::NonFastForward,
        patterns: &[
            "non-fast-forward",
            "not possible to fast-forward",
            "have diverged",
            "divergent branches",
            "fetch first",
        ],
    },
];

/// Classifies a finished git process.
///
/// Returns `None` for exit code 0. Never fails: anything unmatched becomes
/// `Unclassified` carrying the captured output.
#[must_use]
pub fn classify(exit_code: i32, output: &str, hint: ConnectivityHint) -> Option<Classification> {
    if exit_code == 0 {
        return None;
    }
    if hint == ConnectivityHint::Offline {
        return Some(Classification::fixed(ErrorKind::NetworkUnreachable));
    }

    let haystack = output.to_lowercase();
    let matched = RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| haystack.contains(p)));
    if let Some(rule) = matched {
        return Some(Classification::fixed(rule.kind));
    }

    let verbatim = output.trim();
    Some(Classification {
        kind: ErrorKind::Unclassified,
        advice: if verbatim.is_empty() {
            format!("git exited with code {exit_code}")
        } else {
            verbatim.to_string()
        },
    })
}

/// Classifies a failure to start git at all.
#[must_use]
pub fn classify_spawn_error(err: &ProcessError) -> Classification {
    match err {
        ProcessError::ExecutableNotFound { .. } | ProcessError::SpawnFailed { .. } => {
            Classification::fixed(ErrorKind::GitNotInstalled)
        }
        other => Classification {
            kind: ErrorKind::Unclassified,
            advice: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests;
