// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and supervision.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_output() .live_lines()
//!   .spawn() / .spawn_with_cancellation(token)
//!       --> ProcessHandle
//!             take_lines()  OutputLine stream, split on \r and \n
//!             cancel()      kill + reap
//!             wait()        ProcessOutput { exit_code, stdout, stderr,
//!                                           interrupted, pending }
//!   .run() / .run_with_cancellation(token)
//!       --> spawn + wait + exit code check
//! ```

pub mod builder;
pub mod handle;
mod io;
mod runner;
