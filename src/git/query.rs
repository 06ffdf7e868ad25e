// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::GitttyResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

/// Whether `path` itself is the root of a git working tree.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Check for stashed changes.
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or the
/// reference lookup fails.
pub fn has_stashed_changes(path: &Path) -> GitttyResult<bool> {
    GixBackend::has_stashed_changes(path)
}
