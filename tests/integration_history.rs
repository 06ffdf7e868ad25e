// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the clone history file.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use gittty::cmd::clone::pick_from_history;
use gittty::cmd::history::format_history;
use gittty::history::History;
use tempfile::TempDir;

#[test]
fn history_survives_reload() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("state").join("history.json");

    let mut history = History::load(&file).unwrap();
    assert!(history.is_empty());
    history.record("https://example.com/a.git", Path::new("/src/a"), 10);
    history.record("https://example.com/b.git", Path::new("/src/b"), 10);
    history.save(&file).unwrap();

    let reloaded = History::load(&file).unwrap();
    let urls: Vec<_> = reloaded.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, ["https://example.com/b.git", "https://example.com/a.git"]);
}

#[test]
fn history_clear_persists() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("history.json");

    let mut history = History::default();
    history.record("https://example.com/a.git", Path::new("/src/a"), 10);
    history.save(&file).unwrap();

    let mut history = History::load(&file).unwrap();
    history.clear();
    history.save(&file).unwrap();

    assert!(History::load(&file).unwrap().is_empty());
}

#[test]
fn history_formatting() {
    let mut history = History::default();
    let when = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    history.record_at("https://example.com/a.git", Path::new("/src/a"), when, 10);
    history.record_at("https://example.com/a.git", Path::new("/src/a"), when, 10);

    insta::assert_snapshot!(format_history(&history).join("\n"), @" 1  2026-03-01 09:30    2x  https://example.com/a.git  /src/a");
}

#[test]
fn history_entry_reused_by_number() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("history.json");

    let mut history = History::default();
    history.record("https://example.com/a.git", Path::new("/src/a"), 10);
    history.record("git@example.com:o/b.git", Path::new("/src/b"), 10);
    history.save(&file).unwrap();
    let history = History::load(&file).unwrap();

    let (url, path) = pick_from_history(&history, NonZeroUsize::new(2).unwrap()).unwrap();
    assert_eq!(url, "https://example.com/a.git");
    assert_eq!(path, Some(PathBuf::from("/src/a")));

    let err = pick_from_history(&history, NonZeroUsize::new(3).unwrap()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"no history entry 3; pick 1 to 2");

    let err = pick_from_history(&History::default(), NonZeroUsize::MIN).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"no repositories cloned yet");
}
