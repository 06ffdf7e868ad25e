// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use std::path::PathBuf;

use clap::Parser;
use gittty::cli::global::GlobalOptions;
use gittty::cli::{Cli, Command};
use gittty::progress::render::ProgressMode;
use gittty::workflow::PostClonePolicy;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["gittty", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["gittty"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Clone Command
// =============================================================================

#[test]
fn cli_clone_url_only() {
    let cli = Cli::try_parse_from(["gittty", "clone", "git@github.com:o/tool.git"]).unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone");
    };
    assert_eq!(args.url.as_deref(), Some("git@github.com:o/tool.git"));
    assert_eq!(args.path, None);
    assert_eq!(args.depth, None);
    assert!(!args.yes);
}

#[test]
fn cli_clone_all_flags() {
    let cli = Cli::try_parse_from([
        "gittty",
        "clone",
        "https://example.com/a.git",
        "dest",
        "--branch",
        "release",
        "--depth",
        "10",
        "--post-clone-script",
        "setup.sh",
        "--post-clone-failure",
        "report",
        "-y",
    ])
    .unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone");
    };
    assert_eq!(args.path, Some(PathBuf::from("dest")));
    assert_eq!(args.branch.as_deref(), Some("release"));
    assert_eq!(args.depth.map(|d| d.get()), Some(10));
    assert_eq!(args.post_clone_script, Some(PathBuf::from("setup.sh")));
    assert_eq!(args.post_clone_failure, Some(PostClonePolicy::Report));
    assert!(args.yes);
}

#[test]
fn cli_clone_requires_url() {
    assert!(Cli::try_parse_from(["gittty", "clone"]).is_err());
}

#[test]
fn cli_clone_bad_policy_rejected() {
    let result = Cli::try_parse_from(["gittty", "clone", "u", "--post-clone-failure", "ignore"]);
    assert!(result.is_err());
}

// =============================================================================
// Pull and History Commands
// =============================================================================

#[test]
fn cli_pull_path() {
    let cli = Cli::try_parse_from(["gittty", "pull", "../app"]).unwrap();
    let Some(Command::Pull(args)) = cli.command else {
        panic!("expected pull");
    };
    assert_eq!(args.path, PathBuf::from("../app"));
}

#[test]
fn cli_history_default() {
    let cli = Cli::try_parse_from(["gittty", "history"]).unwrap();
    assert!(matches!(cli.command, Some(Command::History(ref h)) if !h.clear));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_log_levels() {
    let cli = Cli::try_parse_from(["gittty", "-l", "5", "--file-log-level", "3", "pull"]).unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.file_log_level, Some(3));
}

#[test]
fn cli_global_options_multiple_inis() {
    let cli =
        Cli::try_parse_from(["gittty", "-i", "base.toml", "-i", "override.toml", "inis"]).unwrap();
    assert_eq!(
        cli.global.inis,
        [PathBuf::from("base.toml"), PathBuf::from("override.toml")]
    );
    assert!(matches!(cli.command, Some(Command::Inis)));
}

#[test]
fn cli_global_options_progress_modes() {
    for (value, mode) in [
        ("bar", ProgressMode::Bar),
        ("spinner", ProgressMode::Spinner),
        ("silent", ProgressMode::Silent),
    ] {
        let cli = Cli::try_parse_from(["gittty", "--progress", value, "options"]).unwrap();
        assert_eq!(cli.global.progress, Some(mode));
    }
    assert!(Cli::try_parse_from(["gittty", "--progress", "fancy", "options"]).is_err());
}

#[test]
fn cli_global_options_to_config_overrides() {
    let opts = GlobalOptions {
        log_level: Some(4),
        offline: true,
        options: vec![
            "network/probe_url=http://localhost:8080/x=y".to_string(),
            "global.history_limit=3".to_string(),
        ],
        ..Default::default()
    };
    let overrides = opts.to_config_overrides().unwrap();
    insta::assert_debug_snapshot!(overrides, @r#"
    [
        (
            "network.probe_url",
            "http://localhost:8080/x=y",
        ),
        (
            "global.history_limit",
            "3",
        ),
        (
            "network.skip_probe",
            "true",
        ),
    ]
    "#);
}

#[test]
fn cli_global_options_bad_set_message() {
    let opts = GlobalOptions {
        options: vec!["nodot=1".to_string()],
        ..Default::default()
    };
    let err = opts.to_config_overrides().unwrap_err();
    insta::assert_snapshot!(err, @"invalid value for 'set' in section '[cli]': expected SECTION.KEY=VALUE, got 'nodot=1'");
}
