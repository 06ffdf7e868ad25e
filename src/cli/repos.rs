// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repos command arguments.
//!
//! ```text
//! repos [SERVICE] [--limit N] [--ssh] [--whoami]
//!   SERVICE   github (default) | gitlab
//!   --limit   overrides hosting.per_page
//! ```

use clap::Args;

use crate::hosting::Service;

/// Arguments for the `repos` command.
#[derive(Debug, Clone, Args)]
pub struct ReposArgs {
    /// Service to ask: github or gitlab.
    #[arg(value_enum, default_value_t)]
    pub service: Service,

    /// How many repositories to list (1 to 100).
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub limit: Option<u8>,

    /// Prints SSH clone URLs instead of HTTPS.
    #[arg(long)]
    pub ssh: bool,

    /// Only shows who the token belongs to.
    #[arg(long)]
    pub whoami: bool,
}
