// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `pull` command.
#[derive(Debug, Clone, Args)]
pub struct PullArgs {
    /// Working tree to update.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Clone this URL into PATH if it is not a working tree yet.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Stash, pull and reapply local changes without asking.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
