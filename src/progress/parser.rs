// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tolerant line matcher for git's progress protocol.
//!
//! ```text
//! "remote: Compressing objects:  50% (2/4)\x1b[K"
//!     strip "remote:" + complete ANSI sequences (leftover ESC -> drop)
//!     blank / punctuation only                  -> drop
//!
//! <Label>: <P>% (<D>/<T>)[, <size> | <rate>/s][, done.]
//!     known label    -> Phase, percent clamped within the phase
//!     unknown label  -> Phase::Unknown heartbeat, percent removed
//! <Counting label>: <N>[, done.]                -> Counting, count only
//! <Known label>: <anything else>                -> truncated, drop
//! anything else                                 -> Phase::Unknown marker
//! ```

use std::sync::LazyLock;
use std::time::Instant;

use futures_util::{Stream, StreamExt, future};
use regex::Regex;

use super::{Phase, ProgressEvent};

/// `<label>: <percent>% (<done>/<total>)<tail>`
pub(super) static PERCENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*):[ \t]+([0-9]{1,3})%[ \t]+\(([0-9]+)/([0-9]+)\)(.*)$")
        .expect("valid percent line regex")
});

/// `<label>: <count>[, done.]`
pub(super) static COUNT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*):[ \t]+([0-9]+)(?:,[ \t]*done\.)?$")
        .expect("valid count line regex")
});

/// `, 1.20 MiB` at the start of the tail.
pub(super) static SIZE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^,[ \t]*([0-9]+(?:\.[0-9]+)?)[ \t]*(bytes|KiB|MiB|GiB|TiB)")
        .expect("valid size regex")
});

/// `600.00 KiB/s` right after the `|`.
pub(super) static RATE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([0-9]+(?:\.[0-9]+)?)[ \t]*(bytes|KiB|MiB|GiB|TiB)/s")
        .expect("valid rate regex")
});

/// Complete CSI sequences, e.g. the `ESC[K` remotes append to clear the line.
pub(super) static ANSI_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[@-~]").expect("valid ANSI regex"));

/// Converts a git-formatted quantity (`1.20`, `MiB`) to bytes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bytes(value: &str, unit: &str) -> Option<u64> {
    let value: f64 = value.parse().ok()?;
    let scale: f64 = match unit {
        "bytes" => 1.0,
        "KiB" => 1024.0,
        "MiB" => 1024.0 * 1024.0,
        "GiB" => 1024.0 * 1024.0 * 1024.0,
        "TiB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };
    Some((value * scale).round() as u64)
}

/// Strips decoration from a raw line. `None` means the line carries nothing.
fn clean(raw: &str) -> Option<String> {
    let stripped = ANSI_SEQUENCE.replace_all(raw, "");
    // An ESC that is not part of a complete sequence: the write was cut short.
    if stripped.contains('\x1b') {
        return None;
    }

    let text = stripped.trim();
    let text = text.strip_prefix("remote:").map_or(text, str::trim);
    if !text.chars().any(char::is_alphanumeric) {
        return None;
    }
    Some(text.to_string())
}

/// Stateful parser for the lines of one operation.
#[derive(Debug)]
pub struct ProgressParser {
    started: Instant,
    /// Phase and highest percent of the last quantitative event.
    current: Option<(Phase, u8)>,
}

impl Default for ProgressParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            current: None,
        }
    }

    /// Parses one line, returning the event it describes if any.
    pub fn parse_line(&mut self, raw: &str) -> Option<ProgressEvent> {
        let line = clean(raw)?;

        if let Some(caps) = PERCENT_LINE.captures(&line) {
            let label = caps[1].trim().to_string();
            let percent: u8 = caps[2].parse().ok().filter(|p| *p <= 100)?;
            let done: u64 = caps[3].parse().ok()?;
            let total: u64 = caps[4].parse().ok()?;
            if done > total {
                return None;
            }

            let tail = caps.get(5).map_or("", |m| m.as_str());
            let (size_text, rate_text) = tail.split_once('|').unwrap_or((tail, ""));
            let transferred_bytes = SIZE_PART
                .captures(size_text)
                .and_then(|c| to_bytes(&c[1], &c[2]));
            let bytes_per_sec = RATE_PART
                .captures(rate_text)
                .and_then(|c| to_bytes(&c[1], &c[2]));

            let phase = Phase::from_label(&label);
            let percent = (phase != Phase::Unknown).then(|| self.clamp(phase, percent));

            return Some(ProgressEvent {
                phase,
                label,
                percent,
                done: Some(done),
                total: Some(total),
                transferred_bytes,
                bytes_per_sec,
                elapsed: self.started.elapsed(),
            });
        }

        if let Some(caps) = COUNT_LINE.captures(&line) {
            let label = caps[1].trim();
            // Only object enumeration reports a bare count; anything else
            // in this shape is a percent line cut short.
            let phase = Phase::from_label(label);
            if phase == Phase::Counting {
                return Some(ProgressEvent {
                    phase,
                    label: label.to_string(),
                    percent: None,
                    done: caps[2].parse().ok(),
                    total: None,
                    transferred_bytes: None,
                    bytes_per_sec: None,
                    elapsed: self.started.elapsed(),
                });
            }
        }

        let known_label = line
            .split_once(':')
            .is_some_and(|(label, _)| Phase::from_label(label.trim()) != Phase::Unknown);
        if known_label {
            return None;
        }

        Some(ProgressEvent {
            phase: Phase::Unknown,
            label: line,
            percent: None,
            done: None,
            total: None,
            transferred_bytes: None,
            bytes_per_sec: None,
            elapsed: self.started.elapsed(),
        })
    }

    /// Keeps percent from going backwards until the phase changes.
    fn clamp(&mut self, phase: Phase, percent: u8) -> u8 {
        let percent = match self.current {
            Some((current, highest)) if current == phase => percent.max(highest),
            _ => percent,
        };
        self.current = Some((phase, percent));
        percent
    }
}

/// Lazily turns a line stream into progress events.
///
/// Suspends between lines and ends when `lines` ends.
pub fn progress_events<S>(lines: S) -> impl Stream<Item = ProgressEvent>
where
    S: Stream<Item = String>,
{
    lines
        .scan(ProgressParser::new(), |parser, line| {
            future::ready(Some(parser.parse_line(&line)))
        })
        .filter_map(future::ready)
}
