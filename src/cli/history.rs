// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History command arguments.

use clap::Args;

/// Arguments for the `history` command.
#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    /// Forgets every remembered repository.
    #[arg(long)]
    pub clear: bool,
}
