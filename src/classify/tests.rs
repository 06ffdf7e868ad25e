// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Classification, ConnectivityHint, ErrorKind, classify, classify_spawn_error};
use crate::error::ProcessError;

fn kind_of(exit_code: i32, output: &str) -> Option<ErrorKind> {
    classify(exit_code, output, ConnectivityHint::Unchecked).map(|c| c.kind())
}

#[test]
fn test_exit_zero_is_never_classified() {
    assert_eq!(kind_of(0, ""), None);
    assert_eq!(kind_of(0, "fatal: Could not resolve host: github.com"), None);
    assert_eq!(
        classify(0, "anything", ConnectivityHint::Offline),
        None,
        "a successful exit wins over the offline hint"
    );
}

#[test]
fn test_real_git_messages() {
    let cases = [
        (
            128,
            "Cloning into 'x'...\nfatal: unable to access 'https://nope.invalid/x.git/': Could not resolve host: nope.invalid",
        ),
        (
            128,
            "ssh: connect to host example.com port 22: Connection timed out\nfatal: Could not read from remote repository.",
        ),
        (
            128,
            "git@github.com: Permission denied (publickey).\nfatal: Could not read from remote repository.",
        ),
        (
            128,
            "fatal: could not read Username for 'https://github.com': terminal prompts disabled",
        ),
        (
            128,
            "remote: Repository not found.\nfatal: repository 'https://github.com/o/missing.git/' not found",
        ),
        (
            128,
            "fatal: '/tmp/nowhere' does not appear to be a git repository",
        ),
        (
            1,
            "error: Your local changes to the following files would be overwritten by merge:\n\tREADME.md\nPlease commit your changes or stash them before you merge.\nAborting",
        ),
        (
            128,
            "hint: Diverging branches can't be fast-forwarded, you need to either:\nfatal: Not possible to fast-forward, aborting.",
        ),
        (1, "some brand new failure"),
    ];

    let kinds: Vec<_> = cases
        .iter()
        .map(|(code, output)| kind_of(*code, output))
        .collect();
    insta::assert_debug_snapshot!(kinds, @r"
    [
        Some(
            NetworkUnreachable,
        ),
        Some(
            NetworkUnreachable,
        ),
        Some(
            AuthenticationFailed,
        ),
        Some(
            AuthenticationFailed,
        ),
        Some(
            RepositoryNotFound,
        ),
        Some(
            RepositoryNotFound,
        ),
        Some(
            LocalChangesWouldBeOverwritten,
        ),
        Some(
            NonFastForward,
        ),
        Some(
            Unclassified,
        ),
    ]
    ");
}

#[test]
fn test_network_wins_over_later_rules() {
    let output = "Could not resolve host: example.com\nremote: Repository not found.";
    assert_eq!(kind_of(128, output), Some(ErrorKind::NetworkUnreachable));
}

#[test]
fn test_local_permission_errors_are_not_authentication() {
    let local = [
        "fatal: could not create work tree dir '/srv/ro/repo': Permission denied",
        "error: unable to unlink old 'bin/tool': Permission denied",
    ];
    for output in local {
        assert_eq!(kind_of(128, output), Some(ErrorKind::Unclassified), "{output}");
    }

    let remote = [
        "remote: Permission to o/app.git denied to someone.\nfatal: unable to access 'https://github.com/o/app.git/': The requested URL returned error: 403",
        "remote: Permission to o/app.git denied to someone.",
        "git@gitlab.com: Permission denied (publickey,keyboard-interactive).",
    ];
    for output in remote {
        assert_eq!(
            kind_of(128, output),
            Some(ErrorKind::AuthenticationFailed),
            "{output}"
        );
    }
}

#[test]
fn test_offline_hint_forces_network_unreachable() {
    let classified = classify(128, "some brand new failure", ConnectivityHint::Offline)
        .expect("non-zero exit is classified");
    assert_eq!(classified.kind(), ErrorKind::NetworkUnreachable);

    let online = classify(128, "some brand new failure", ConnectivityHint::Online)
        .expect("non-zero exit is classified");
    assert_eq!(online.kind(), ErrorKind::Unclassified);
}

#[test]
fn test_unclassified_advice_is_verbatim_output() {
    let classified = classify(2, "  weird failure\nsecond line \n", ConnectivityHint::Unchecked)
        .expect("non-zero exit is classified");
    insta::assert_snapshot!(classified.advice(), @r"
    weird failure
    second line
    ");

    let empty = classify(5, "", ConnectivityHint::Unchecked).expect("classified");
    insta::assert_snapshot!(empty.to_string(), @"unclassified: git exited with code 5");
}

#[test]
fn test_classification_is_idempotent() {
    let output = "fatal: Authentication failed for 'https://example.com/x.git/'";
    let first = classify(128, output, ConnectivityHint::Unchecked);
    let second = classify(128, output, ConnectivityHint::Unchecked);
    assert_eq!(first, second);
    assert_eq!(
        first.as_ref().map(Classification::advice),
        Some(ErrorKind::AuthenticationFailed.remediation())
    );
}

#[test]
fn test_only_local_changes_trigger_auto_stash() {
    assert!(ErrorKind::LocalChangesWouldBeOverwritten.triggers_auto_stash());
    assert!(!ErrorKind::NonFastForward.triggers_auto_stash());
    assert!(!ErrorKind::Unclassified.triggers_auto_stash());
}

#[test]
fn test_spawn_error_means_git_not_installed() {
    let err = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    };
    let classified = classify_spawn_error(&err);
    assert_eq!(classified.kind(), ErrorKind::GitNotInstalled);
    insta::assert_snapshot!(classified.advice(), @"git was not found. Install git and make sure it is in your PATH.");
}
