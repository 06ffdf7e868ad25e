// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, GitttyError, GitttyResult, ProcessError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "clone".to_string(),
        key: "depth".to_string(),
        message: "depth must be a positive integer".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'depth' in section '[clone]': depth must be a positive integer"
    );
}

#[test]
fn test_gittty_error_size() {
    // Every variant is a thin Box: pointer plus discriminant
    let size = std::mem::size_of::<GitttyError>();
    assert!(size <= 16, "GitttyError is {size} bytes, expected <= 16");
}

#[test]
fn test_gittty_result_size() {
    let size = std::mem::size_of::<GitttyResult<()>>();
    assert!(size <= 16, "GitttyResult<()> is {size} bytes, expected <= 16");
}

#[test]
fn test_boxing_conversions() {
    let git: GitttyError = GitError::DestinationNotEmpty {
        path: "/tmp/full".to_string(),
    }
    .into();
    assert!(matches!(git, GitttyError::Git(_)));
    insta::assert_snapshot!(
        git.to_string(),
        @"git error: destination '/tmp/full' already exists and is not an empty directory"
    );

    let io: GitttyError = std::io::Error::other("disk on fire").into();
    assert!(matches!(io, GitttyError::Io(_)));
    insta::assert_snapshot!(io.to_string(), @"io error: disk on fire");
}

#[test]
fn test_spawn_error_detection() {
    let missing = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    };
    let spawn = ProcessError::SpawnFailed {
        command: "git clone".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    let exit = ProcessError::NonZeroExit {
        command: "git pull".to_string(),
        code: 1,
    };

    assert!(missing.is_spawn_error());
    assert!(spawn.is_spawn_error());
    assert!(!exit.is_spawn_error());
}
