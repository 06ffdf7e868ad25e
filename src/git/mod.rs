// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git repository access.
//!
//! ```text
//!        Public API
//!   query.rs  cmd.rs  discovery.rs
//!      |        |         |
//!      v        |         v
//!  GixBackend   |    repo name from URL,
//!  (gix, read)  |    clone destination
//!  .is_repo     v
//!  .stashed  ProcessBuilder("git")
//!            non-interactive env
//! ```
//!
//! **`GixBackend`** is pure Rust, no subprocess, read-only.
//! Everything that changes a repository goes through the git CLI
//! (see `workflow::executor`) so its progress output can be observed.

pub mod backend;
pub mod cmd;
pub mod discovery;
pub mod query;

#[cfg(test)]
mod tests;
