// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read) --> GixBackend (pure Rust gix)
//! ```

use crate::error::{GitError, GitttyResult, GixError};
use std::path::Path;

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if `path` is the top of a git work tree.
    ///
    /// Parent directories are not searched: a subdirectory of a checkout is
    /// not a repository for clone/pull routing purposes.
    fn is_git_repo(path: &Path) -> bool;

    /// Check for stashed changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or the
    /// reference lookup fails.
    fn has_stashed_changes(path: &Path) -> GitttyResult<bool>;
}

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn has_stashed_changes(path: &Path) -> GitttyResult<bool> {
        let repo = gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?;

        // refs/stash exists iff there are stashed changes
        match repo.find_reference("refs/stash") {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { name: _ }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Reference(e)).into()),
        }
    }
}
