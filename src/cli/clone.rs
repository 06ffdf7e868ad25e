// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command arguments.
//!
//! ```text
//! clone URL [PATH]
//!   PATH omitted     → <global.clone_dir or cwd>/<repo name>
//!   PATH is a repo   → pull instead
//!   --branch / --depth / --post-clone-script override [clone]
//! clone --from-history N
//!   URL and PATH of entry N in `gittty history`
//! ```

use clap::Args;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;

use crate::config::Config;
use crate::workflow::{CloneOptions, PostClonePolicy};

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Repository URL (HTTPS, SSH or a local path).
    #[arg(required_unless_present = "from_history")]
    pub url: Option<String>,

    /// Destination directory.
    pub path: Option<PathBuf>,

    /// Clones entry N of `gittty history` again, into the same place.
    #[arg(
        long = "from-history",
        value_name = "N",
        conflicts_with_all = ["url", "path"]
    )]
    pub from_history: Option<NonZeroUsize>,

    /// Branch to check out.
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Create a shallow clone with this many commits.
    #[arg(long, value_name = "N")]
    pub depth: Option<NonZeroU32>,

    /// Script to run inside the fresh clone.
    #[arg(long = "post-clone-script", value_name = "FILE")]
    pub post_clone_script: Option<PathBuf>,

    /// Whether a failing post-clone script fails the clone.
    #[arg(long = "post-clone-failure", value_name = "POLICY")]
    pub post_clone_failure: Option<PostClonePolicy>,

    /// Answers yes to the auto-stash prompt if the clone turns into a pull.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl CloneArgs {
    /// Clone options: flags over `[clone]` over defaults.
    #[must_use]
    pub fn clone_options(&self, config: &Config) -> CloneOptions {
        let defaults = config.clone_options();
        CloneOptions {
            branch: self.branch.clone().or(defaults.branch),
            depth: self.depth.or(defaults.depth),
            post_clone_script: self.post_clone_script.clone().or(defaults.post_clone_script),
            post_clone_policy: self.post_clone_failure.unwrap_or(defaults.post_clone_policy),
        }
    }
}
