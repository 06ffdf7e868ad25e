// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History command implementation for gittty.

use anyhow::anyhow;

use crate::cli::history::HistoryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::history::History;

/// Main handler for the history command.
///
/// # Errors
///
/// Returns an error if there is no history location or it cannot be read
/// or written.
pub fn run_history_command(args: &HistoryArgs, config: &Config) -> Result<()> {
    let file = config
        .history_path()
        .ok_or_else(|| anyhow!("no config directory; set global.history_file"))?;
    let mut history = History::load(&file)?;

    if args.clear {
        history.clear();
        history.save(&file)?;
        println!("History cleared");
        return Ok(());
    }

    if history.is_empty() {
        println!("No repositories cloned yet");
    }
    for line in format_history(&history) {
        println!("{line}");
    }
    Ok(())
}

/// One numbered line per entry, most recent first. The numbers are what
/// `clone --from-history` takes.
#[must_use]
pub fn format_history(history: &History) -> Vec<String> {
    history
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{:>2}  {}  {:>3}x  {}  {}",
                i + 1,
                e.last_used.format("%Y-%m-%d %H:%M"),
                e.count,
                e.url,
                e.path.display()
            )
        })
        .collect()
}
