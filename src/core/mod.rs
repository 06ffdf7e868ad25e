// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!        core
//!         |
//!         v
//!      process
//!         |
//!   Builder -> spawn() -> ProcessHandle
//!                          lines()  cancel()  wait()
//! ```

pub mod process;
