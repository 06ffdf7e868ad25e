// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       clone / pull / history / repos
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |  config  history  hosting |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |   workflow::Orchestrator  |
//!              |  clone, pull, StashCycle  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!             progress  classify   git / net
//!             parser,   ErrorKind  gix probes,
//!             render               HTTP probe
//!                 |
//!   +-----------------------------------------+
//!   |  core   process runner, live lines      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod classify;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod history;
pub mod hosting;
pub mod logging;
pub mod net;
pub mod progress;
pub mod workflow;
