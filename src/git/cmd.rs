// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command construction.
//!
//! ```text
//! git() --> ProcessBuilder("git")
//!             .env(GCM_INTERACTIVE=never, GIT_TERMINAL_PROMPT=0,
//!                  GIT_PROGRESS_DELAY=0, LC_ALL=C)
//! ```

use crate::core::process::builder::ProcessBuilder;

/// Name of the git executable looked up in PATH.
pub const GIT: &str = "git";

/// Environment applied to every git invocation.
///
/// Credential helpers and terminal prompts would block on a stdin we never
/// provide. Progress is requested immediately instead of after git's default
/// two second delay, and messages are pinned to the C locale so the error
/// patterns match regardless of the user's language.
pub const GIT_ENV: [(&str, &str); 4] = [
    ("GCM_INTERACTIVE", "never"),
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GIT_PROGRESS_DELAY", "0"),
    ("LC_ALL", "C"),
];

/// Creates a git process builder with [`GIT_ENV`] applied.
#[must_use]
pub fn git() -> ProcessBuilder {
    GIT_ENV
        .iter()
        .fold(ProcessBuilder::new(GIT).name(GIT), |b, (k, v)| b.env(*k, *v))
}

/// Whether a git executable can be found in PATH.
#[must_use]
pub fn git_is_installed() -> bool {
    ProcessBuilder::exists(GIT)
}
