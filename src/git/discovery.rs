// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone destination discovery.
//!
//! ```text
//! https://github.com/owner/repo.git  --> repo
//! git@github.com:owner/repo.git      --> repo
//! /srv/git/repo/                     --> repo
//!
//! resolve_destination(url, path?, clone_dir)
//!   path or clone_dir/<repo>
//!     missing / empty dir  --> Destination::Fresh
//!     git work tree        --> Destination::Existing
//!     anything else        --> GitError::DestinationNotEmpty
//! ```

use std::path::{Path, PathBuf};

use crate::error::{GitError, GitttyResult};

use super::query::is_git_repo;

/// Where a clone request should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Nothing there yet (or an empty directory): clone into it.
    Fresh(PathBuf),
    /// Already a checkout: pull instead of cloning.
    Existing(PathBuf),
}

impl Destination {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Fresh(p) | Self::Existing(p) => p,
        }
    }
}

/// Derives the directory name git itself would pick for `url`.
#[must_use]
pub fn repo_name_from_url(url: &str) -> Option<&str> {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let name = trimmed
        .rsplit(['/', ':', '\\'])
        .next()
        .unwrap_or(trimmed);

    (!name.is_empty()).then_some(name)
}

/// Resolves the destination of a clone.
///
/// # Errors
///
/// Returns `GitError::UnnamedRemote` when no path is given and none can be
/// derived from `url`, or `GitError::DestinationNotEmpty` when the target
/// holds something other than a git work tree.
pub fn resolve_destination(
    url: &str,
    explicit: Option<&Path>,
    clone_dir: &Path,
) -> GitttyResult<Destination> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let name = repo_name_from_url(url).ok_or_else(|| GitError::UnnamedRemote {
                url: url.to_string(),
            })?;
            clone_dir.join(name)
        }
    };

    if !path.exists() {
        return Ok(Destination::Fresh(path));
    }
    if is_git_repo(&path) {
        return Ok(Destination::Existing(path));
    }
    if is_empty_dir(&path) {
        return Ok(Destination::Fresh(path));
    }

    Err(GitError::DestinationNotEmpty {
        path: path.display().to_string(),
    }
    .into())
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}
