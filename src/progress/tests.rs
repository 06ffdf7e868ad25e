// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use futures_util::{StreamExt, stream};

use super::parser::{ANSI_SEQUENCE, COUNT_LINE, PERCENT_LINE, RATE_PART, SIZE_PART};
use super::render::{ProgressMode, describe};
use super::{Phase, ProgressEvent, ProgressParser, progress_events};

fn parse_all(lines: &[&str]) -> Vec<ProgressEvent> {
    let mut parser = ProgressParser::new();
    lines.iter().filter_map(|l| parser.parse_line(l)).collect()
}

fn summary(events: &[ProgressEvent]) -> Vec<(Phase, Option<u8>)> {
    events.iter().map(|e| (e.phase, e.percent)).collect()
}

#[test]
fn test_line_patterns_compile() {
    let samples = [
        (&*PERCENT_LINE, "Receiving objects:  50% (5/10)"),
        (&*COUNT_LINE, "Enumerating objects: 42, done."),
        (&*SIZE_PART, ", 1.20 MiB "),
        (&*RATE_PART, " 600.00 KiB/s"),
        (&*ANSI_SEQUENCE, "\x1b[K"),
    ];
    for (re, sample) in samples {
        assert!(re.is_match(sample), "{} should match {sample:?}", re.as_str());
    }
}

#[test]
fn test_receiving_objects_with_size_and_rate() {
    let events = parse_all(&[
        "Receiving objects:  10% (1/10)",
        "Receiving objects:  50% (5/10), 1.20 MiB | 600.00 KiB/s",
        "Receiving objects: 100% (10/10), 2.50 MiB | 1.10 MiB/s, done.",
    ]);

    let fields: Vec<_> = events
        .iter()
        .map(|e| (e.percent, e.done, e.total, e.transferred_bytes, e.bytes_per_sec))
        .collect();
    assert!(events.iter().all(|e| e.phase == Phase::Receiving));
    assert_eq!(
        fields,
        vec![
            (Some(10), Some(1), Some(10), None, None),
            (Some(50), Some(5), Some(10), Some(1_258_291), Some(614_400)),
            (Some(100), Some(10), Some(10), Some(2_621_440), Some(1_153_434)),
        ]
    );
}

#[test]
fn test_percent_never_regresses_within_a_phase() {
    let events = parse_all(&[
        "Receiving objects:  50% (5/10)",
        "Receiving objects:  40% (4/10)",
        "Receiving objects:  60% (6/10)",
        "Resolving deltas:   0% (0/3)",
        "Resolving deltas:  33% (1/3)",
    ]);

    insta::assert_debug_snapshot!(summary(&events), @r"
    [
        (
            Receiving,
            Some(
                50,
            ),
        ),
        (
            Receiving,
            Some(
                50,
            ),
        ),
        (
            Receiving,
            Some(
                60,
            ),
        ),
        (
            ResolvingDeltas,
            Some(
                0,
            ),
        ),
        (
            ResolvingDeltas,
            Some(
                33,
            ),
        ),
    ]
    ");
}

#[test]
fn test_remote_prefix_and_ansi_are_stripped() {
    let events = parse_all(&[
        "remote: Enumerating objects: 5, done.",
        "remote: Counting objects: 100% (5/5), done.\x1b[K",
        "remote: Compressing objects:  50% (1/2)\x1b[K",
    ]);

    assert_eq!(
        summary(&events),
        vec![
            (Phase::Counting, None),
            (Phase::Counting, Some(100)),
            (Phase::Compressing, Some(50)),
        ]
    );
    assert_eq!(events[0].done, Some(5));
    assert_eq!(events[2].label, "Compressing objects");
}

#[test]
fn test_malformed_lines_are_dropped() {
    let events = parse_all(&[
        "",
        "   ",
        "...",
        "remote:",
        "\x1b[",
        "Receiving objects:  10% (1/10)\x1b",
        "Receiving objects:  45% (450/",
        "Receiving objects: abc",
        "Receiving objects: 150% (1/2)",
        "Receiving objects:  10% (11/10)",
    ]);
    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_unrecognized_lines_become_heartbeats() {
    let events = parse_all(&[
        "Cloning into 'widget'...",
        "Updating files:  50% (1/2)",
        "Unpacking objects: 100% (3/3), 1.01 KiB | 1.01 MiB/s, done.",
    ]);

    let view: Vec<_> = events
        .iter()
        .map(|e| (e.phase, e.label.as_str(), e.percent, e.done, e.total))
        .collect();
    insta::assert_debug_snapshot!(view, @r#"
    [
        (
            Unknown,
            "Cloning into 'widget'...",
            None,
            None,
            None,
        ),
        (
            Unknown,
            "Updating files",
            None,
            Some(
                1,
            ),
            Some(
                2,
            ),
        ),
        (
            Unknown,
            "Unpacking objects",
            None,
            Some(
                3,
            ),
            Some(
                3,
            ),
        ),
    ]
    "#);
}

#[test]
fn test_heartbeat_does_not_reset_phase_clamp() {
    let events = parse_all(&[
        "Receiving objects:  80% (8/10)",
        "Checking connectivity... done.",
        "Receiving objects:  70% (7/10)",
    ]);
    assert_eq!(
        summary(&events),
        vec![
            (Phase::Receiving, Some(80)),
            (Phase::Unknown, None),
            (Phase::Receiving, Some(80)),
        ]
    );
}

#[test]
fn test_elapsed_is_monotonic() {
    let events = parse_all(&["Counting objects:  10% (1/10)", "Counting objects:  20% (2/10)"]);
    assert!(events[0].elapsed <= events[1].elapsed);
}

#[tokio::test]
async fn test_event_stream_preserves_order_and_skips_garbage() {
    let lines = stream::iter(
        [
            "Cloning into 'widget'...",
            "Receiving objects:  33% (1/3)",
            "Receiving objects:  4",
            "Receiving objects:  66% (2/3)",
            "\x1b[",
            "Receiving objects: 100% (3/3), done.",
        ]
        .map(String::from),
    );

    let events: Vec<_> = progress_events(lines).collect().await;
    assert_eq!(
        summary(&events),
        vec![
            (Phase::Unknown, None),
            (Phase::Receiving, Some(33)),
            (Phase::Receiving, Some(66)),
            (Phase::Receiving, Some(100)),
        ]
    );
}

#[tokio::test]
async fn test_event_stream_ends_with_empty_input() {
    let events: Vec<_> = progress_events(stream::empty::<String>()).collect().await;
    assert!(events.is_empty());
}

fn event(phase: Phase, label: &str) -> ProgressEvent {
    ProgressEvent {
        phase,
        label: label.to_string(),
        percent: None,
        done: None,
        total: None,
        transferred_bytes: None,
        bytes_per_sec: None,
        elapsed: Duration::ZERO,
    }
}

#[test]
fn test_describe_events() {
    let receiving = ProgressEvent {
        percent: Some(45),
        done: Some(450),
        total: Some(1000),
        transferred_bytes: Some(1_258_291),
        bytes_per_sec: Some(614_400),
        ..event(Phase::Receiving, "Receiving objects")
    };
    let counted = ProgressEvent {
        done: Some(5),
        ..event(Phase::Counting, "Enumerating objects")
    };
    let marker = event(Phase::Unknown, "Cloning into 'widget'...");

    let described: Vec<_> = [receiving, counted, marker].iter().map(describe).collect();
    insta::assert_debug_snapshot!(described, @r#"
    [
        "receiving 45% (450/1000) 1.20 MiB @ 600.00 KiB/s",
        "counting (5)",
        "Cloning into 'widget'...",
    ]
    "#);
}

#[test]
fn test_progress_mode_degrades_without_terminal() {
    assert_eq!(ProgressMode::Bar.resolve(true), ProgressMode::Bar);
    assert_eq!(ProgressMode::Bar.resolve(false), ProgressMode::Spinner);
    assert_eq!(ProgressMode::Spinner.resolve(false), ProgressMode::Spinner);
    assert_eq!(ProgressMode::Silent.resolve(true), ProgressMode::Silent);
}

#[test]
fn test_progress_mode_from_str() {
    assert_eq!("Spinner".parse::<ProgressMode>(), Ok(ProgressMode::Spinner));
    assert_eq!("silent".parse::<ProgressMode>(), Ok(ProgressMode::Silent));
    assert!("fancy".parse::<ProgressMode>().is_err());
}
