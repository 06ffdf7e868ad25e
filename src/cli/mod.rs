// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gittty using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gittty [global options] <command>
//! clone URL [PATH] [--branch B] [--depth N] [--post-clone-script FILE]
//! clone --from-history N
//! pull [PATH] [--url URL] [--yes]
//! history [--clear]
//! repos [github|gitlab] [--limit N] [--ssh] [--whoami]
//! options
//! inis
//! version
//! ```

pub mod clone;
pub mod global;
pub mod history;
pub mod pull;
pub mod repos;


use crate::cli::clone::CloneArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::history::HistoryArgs;
use crate::cli::pull::PullArgs;
use crate::cli::repos::ReposArgs;
use clap::{Parser, Subcommand};

/// gittty: Git lifeline for the TTY
///
/// Clones and pulls with live progress, plain-language failures and
/// automatic stashing around pulls blocked by local changes.
#[derive(Debug, Parser)]
#[command(
    name = "gittty",
    author,
    version,
    about = "Git lifeline for the TTY",
    long_about = "gittty Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Clones and pulls git repositories with live progress and\n\
                  plain-language failures. A pull blocked by local changes can\n\
                  stash them, pull, and put them back in one go.",
    after_help = "CONFIG FILES:\n\n\
                  gittty reads `gittty.toml` from the user config directory, then\n\
                  `gittty.toml` in the current directory, then every --ini in order.\n\
                  GITTTY_<SECTION>__<KEY> environment variables and --set come last.\n\
                  Use --no-default-inis to only read --ini files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used.
    Inis,

    /// Clones a repository, or pulls it if it is already there.
    Clone(CloneArgs),

    /// Pulls a working tree, stashing local changes if they are in the way.
    Pull(PullArgs),

    /// Lists recently cloned repositories, numbered for `clone --from-history`.
    History(HistoryArgs),

    /// Lists your repositories on GitHub or GitLab with their clone URLs.
    Repos(ReposArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
