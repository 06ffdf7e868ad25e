// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structured progress from git's carriage-return status lines.
//!
//! ```text
//! LineStream (stderr + stdout text)
//!        |
//!        v
//!  progress_events()        scan(ProgressParser) + filter_map
//!        |
//!        v
//!  ProgressEvent { phase, percent, done/total, bytes, rate, elapsed }
//!        |
//!        v
//!  ProgressSink             render::ProgressDisplay (Bar | Spinner | Silent)
//! ```
//!
//! The parser never fails: lines it cannot make sense of are dropped, and
//! the event stream ends exactly when the line stream does.

pub mod parser;
pub mod render;

#[cfg(test)]
mod tests;

use std::fmt;
use std::time::Duration;

pub use parser::{ProgressParser, progress_events};

/// A named stage of a git transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Counting,
    Compressing,
    Receiving,
    ResolvingDeltas,
    /// Any other status line, shown as a heartbeat.
    Unknown,
}

impl Phase {
    /// Maps a git progress label to its phase.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Counting objects" | "Enumerating objects" => Self::Counting,
            "Compressing objects" => Self::Compressing,
            "Receiving objects" => Self::Receiving,
            "Resolving deltas" => Self::ResolvingDeltas,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counting => "counting",
            Self::Compressing => "compressing",
            Self::Receiving => "receiving",
            Self::ResolvingDeltas => "resolving deltas",
            Self::Unknown => "working",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time snapshot of an operation's progress.
///
/// `percent` never decreases between two consecutive events of the same
/// phase; it starts over when the phase changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub phase: Phase,
    /// Text git printed before the colon (or the whole line for markers).
    pub label: String,
    pub percent: Option<u8>,
    pub done: Option<u64>,
    pub total: Option<u64>,
    pub transferred_bytes: Option<u64>,
    pub bytes_per_sec: Option<u64>,
    /// Time since the parser saw its first line.
    pub elapsed: Duration,
}

impl ProgressEvent {
    /// A marker that some phase began without quantitative progress.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        self.percent.is_none()
    }
}

/// Receives progress for rendering.
///
/// The orchestration core does not care how (or whether) events are shown.
pub trait ProgressSink: Send + Sync {
    /// An operation started; `title` names it, e.g. `clone https://...`.
    fn begin(&self, title: &str);

    /// One parsed event, in the order git wrote the underlying lines.
    fn on_event(&self, event: &ProgressEvent);

    /// The operation's process has exited.
    fn finish(&self, success: bool);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn begin(&self, _title: &str) {}
    fn on_event(&self, _event: &ProgressEvent) {}
    fn finish(&self, _success: bool) {}
}
