// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogFormat, LogLevel};

#[test]
fn test_log_level_range() {
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::DEBUG));
    assert_eq!(LogLevel::from_u8(42), None);
    assert_eq!(u8::from(LogLevel::TRACE), 5);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,gittty=info",
        "warn,gittty=debug",
        "warn,gittty=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_level_try_from() {
    assert_eq!(LogLevel::try_from(2).ok(), Some(LogLevel::WARN));
    let err = LogLevel::try_from(9).unwrap_err();
    insta::assert_snapshot!(err, @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9");
}

#[test]
fn test_log_format_from_extension() {
    assert_eq!(LogFormat::for_path(Path::new("run.json")), LogFormat::Json);
    assert_eq!(LogFormat::for_path(Path::new("run.jsonl")), LogFormat::Json);
    assert_eq!(LogFormat::for_path(Path::new("run.log")), LogFormat::Text);
    assert_eq!(LogFormat::for_path(Path::new("run")), LogFormat::Text);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert_eq!(config.file_format(), LogFormat::Text);

    let with_file = LogConfig::builder()
        .with_log_file("logs/gittty.json".to_string())
        .build();
    assert_eq!(with_file.file_format(), LogFormat::Json);
}
