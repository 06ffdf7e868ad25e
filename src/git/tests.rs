// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{GitError, GitttyError};
use crate::git::cmd::{GIT_ENV, git};
use crate::git::discovery::{Destination, repo_name_from_url, resolve_destination};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_repo_name_from_url() {
    let names: Vec<_> = [
        "https://github.com/owner/repo.git",
        "https://github.com/owner/repo",
        "https://github.com/owner/repo/",
        "git@github.com:owner/repo.git",
        "git@host:repo.git",
        "ssh://git@host:2222/owner/repo.git",
        "/srv/git/repo.git/",
        "file:///srv/git/repo",
        "",
        ".git",
    ]
    .into_iter()
    .map(|url| (url, repo_name_from_url(url)))
    .collect();

    insta::assert_debug_snapshot!(names, @r#"
    [
        (
            "https://github.com/owner/repo.git",
            Some(
                "repo",
            ),
        ),
        (
            "https://github.com/owner/repo",
            Some(
                "repo",
            ),
        ),
        (
            "https://github.com/owner/repo/",
            Some(
                "repo",
            ),
        ),
        (
            "git@github.com:owner/repo.git",
            Some(
                "repo",
            ),
        ),
        (
            "git@host:repo.git",
            Some(
                "repo",
            ),
        ),
        (
            "ssh://git@host:2222/owner/repo.git",
            Some(
                "repo",
            ),
        ),
        (
            "/srv/git/repo.git/",
            Some(
                "repo",
            ),
        ),
        (
            "file:///srv/git/repo",
            Some(
                "repo",
            ),
        ),
        (
            "",
            None,
        ),
        (
            ".git",
            None,
        ),
    ]
    "#);
}

#[test]
fn test_resolve_destination_fresh_under_clone_dir() {
    let temp = temp_dir();
    let dest = resolve_destination("https://example.com/a/widget.git", None, temp.path())
        .expect("missing directory is a fresh destination");
    assert_eq!(dest, Destination::Fresh(temp.path().join("widget")));
}

#[test]
fn test_resolve_destination_explicit_empty_dir() {
    let temp = temp_dir();
    let dest = resolve_destination("https://example.com/a/widget.git", Some(temp.path()), Path::new("/unused"))
        .expect("empty directory is a fresh destination");
    assert_eq!(dest.path(), temp.path());
    assert!(matches!(dest, Destination::Fresh(_)));
}

#[test]
fn test_resolve_destination_existing_repo() {
    let temp = temp_dir();
    let repo = temp.path().join("widget");
    gix::init(&repo).expect("failed to init repo");

    let dest = resolve_destination("https://example.com/a/widget.git", None, temp.path())
        .expect("existing checkout resolves");
    assert_eq!(dest, Destination::Existing(repo));
}

#[test]
fn test_resolve_destination_rejects_non_empty_dir() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("notes.txt"), "keep me").expect("write file");

    let err = resolve_destination("https://example.com/a/widget.git", Some(temp.path()), temp.path())
        .expect_err("non-empty directory must be rejected");
    assert!(matches!(
        err,
        GitttyError::Git(ref e) if matches!(**e, GitError::DestinationNotEmpty { .. })
    ));
}

#[test]
fn test_resolve_destination_unnamed_remote() {
    let temp = temp_dir();
    let err = resolve_destination("/", None, temp.path()).expect_err("no name can be derived");
    insta::assert_snapshot!(err.to_string(), @"git error: cannot derive a directory name from '/'");
}

#[test]
fn test_git_builder_is_non_interactive() {
    let builder = git().cwd(".");
    assert_eq!(builder.program(), Path::new("git"));
    assert_eq!(builder.working_dir(), Some(Path::new(".")));
    assert_eq!(builder.command_line(), "git");
    assert!(GIT_ENV.contains(&("GIT_TERMINAL_PROMPT", "0")));
    assert!(GIT_ENV.contains(&("GCM_INTERACTIVE", "never")));
}
