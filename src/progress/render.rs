// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terminal rendering of progress events.
//!
//! ```text
//! ProgressMode::resolve(requested, stderr is a tty)
//!     Bar      [####>-----]  45% receiving  1.20 MiB @ 600.00 KiB/s
//!     Spinner  * receiving 45% (450/1000) 1.20 MiB @ 600.00 KiB/s
//!     Silent   (none)
//!
//! Bar needs cursor control; without a terminal it degrades to Spinner.
//! The events are the same either way.
//! ```

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::{Phase, ProgressEvent, ProgressSink};

/// Pre-validated progress bar style for phases with a percentage.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos:>3}% {prefix:.bold} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Pre-validated spinner style for everything else.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// Show a visual progress bar per phase
    #[default]
    Bar,
    /// Show a spinner with the latest status line
    Spinner,
    /// No visual progress
    Silent,
}

impl ProgressMode {
    /// Downgrades `Bar` to `Spinner` when the output is not a terminal.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> Self {
        match self {
            Self::Bar if !is_terminal => Self::Spinner,
            other => other,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Spinner => "spinner",
            Self::Silent => "silent",
        }
    }
}

impl FromStr for ProgressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "spinner" => Ok(Self::Spinner),
            "silent" => Ok(Self::Silent),
            other => Err(format!("expected bar, spinner or silent, got '{other}'")),
        }
    }
}

/// One-line description of an event, used as the spinner message.
#[must_use]
pub fn describe(event: &ProgressEvent) -> String {
    if event.is_marker() && event.done.is_none() {
        return event.label.clone();
    }

    let mut text = if event.phase == Phase::Unknown {
        event.label.clone()
    } else {
        event.phase.as_str().to_string()
    };
    if let Some(percent) = event.percent {
        let _ = write!(text, " {percent}%");
    }
    match (event.done, event.total) {
        (Some(done), Some(total)) => {
            let _ = write!(text, " ({done}/{total})");
        }
        (Some(done), None) => {
            let _ = write!(text, " ({done})");
        }
        _ => {}
    }
    if let Some(bytes) = event.transferred_bytes {
        let _ = write!(text, " {}", HumanBytes(bytes));
    }
    if let Some(rate) = event.bytes_per_sec {
        let _ = write!(text, " @ {}/s", HumanBytes(rate));
    }
    text
}

/// `indicatif` progress renderer on stderr.
pub struct ProgressDisplay {
    mode: ProgressMode,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressDisplay {
    /// Creates a display, degrading `Bar` when stderr is not a terminal.
    #[must_use]
    pub fn new(requested: ProgressMode) -> Self {
        Self {
            mode: requested.resolve(std::io::stderr().is_terminal()),
            bar: Mutex::new(None),
        }
    }

    /// The strategy in effect after terminal detection.
    #[must_use]
    pub const fn mode(&self) -> ProgressMode {
        self.mode
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl ProgressSink for ProgressDisplay {
    fn begin(&self, title: &str) {
        let pb = match self.mode {
            ProgressMode::Silent => return,
            ProgressMode::Bar => {
                let pb = ProgressBar::new(100);
                pb.set_style(bar_style());
                pb
            }
            ProgressMode::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                pb
            }
        };
        pb.set_message(title.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = guard.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_event(&self, event: &ProgressEvent) {
        let mode = self.mode;
        self.with_bar(|pb| match (mode, event.percent) {
            (ProgressMode::Bar, Some(percent)) => {
                pb.set_prefix(event.phase.as_str());
                pb.set_position(u64::from(percent));
                let mut detail = String::new();
                if let Some(bytes) = event.transferred_bytes {
                    let _ = write!(detail, "{}", HumanBytes(bytes));
                }
                if let Some(rate) = event.bytes_per_sec {
                    let _ = write!(detail, " @ {}/s", HumanBytes(rate));
                }
                pb.set_message(detail);
            }
            (ProgressMode::Bar, None) => {
                pb.set_prefix("");
                pb.set_position(0);
                pb.set_message(describe(event));
            }
            _ => pb.set_message(describe(event)),
        });
    }

    fn finish(&self, success: bool) {
        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.take() {
            if success {
                pb.finish_and_clear();
            } else {
                pb.abandon();
            }
        }
    }
}
