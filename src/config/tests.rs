// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::hosting::Service;
use crate::progress::render::ProgressMode;
use crate::workflow::PostClonePolicy;
use std::io::Write;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.global.progress, ProgressMode::Bar);
    assert_eq!(config.global.post_clone_failure, PostClonePolicy::Report);
    assert_eq!(config.global.history_limit, 20);
    assert_eq!(config.network.probe_url, "https://github.com");
    assert_eq!(config.probe_timeout(), Duration::from_secs(5));
    assert!(!config.network.skip_probe);
    assert_eq!(config.clone_options(), crate::workflow::CloneOptions::default());
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
        [global]
        clone_dir = "/src"
        progress = "spinner"
        post_clone_failure = "fail"
        history_limit = 5

        [network]
        probe_url = "http://127.0.0.1:9"
        skip_probe = true

        [clone]
        depth = 1
        branch = "main"
        post_clone_script = "hooks/setup.sh"
        "#,
    )
    .unwrap();

    assert_eq!(config.global.clone_dir, Some(PathBuf::from("/src")));
    assert_eq!(config.global.progress, ProgressMode::Spinner);
    assert!(config.network.skip_probe);

    let options = config.clone_options();
    assert_eq!(options.depth, NonZeroU32::new(1));
    assert_eq!(options.branch.as_deref(), Some("main"));
    assert_eq!(options.post_clone_script, Some(PathBuf::from("hooks/setup.sh")));
    assert_eq!(options.post_clone_policy, PostClonePolicy::Fail);
}

#[test]
fn test_validation_rejects_zeroes() {
    for (toml, key) in [
        ("[clone]\ndepth = 0", "depth"),
        ("[network]\nprobe_timeout_secs = 0", "probe_timeout_secs"),
        ("[global]\nhistory_limit = 0", "history_limit"),
        ("[network]\nprobe_url = \"  \"", "probe_url"),
        ("[hosting]\nper_page = 0", "per_page"),
        ("[hosting]\nper_page = 101", "per_page"),
    ] {
        let err = Config::parse(toml).unwrap_err().to_string();
        assert!(err.contains(key), "{toml:?} gave {err}");
    }
}

#[test]
fn test_validation_message() {
    let err = Config::parse("[clone]\ndepth = 0").unwrap_err();
    insta::assert_snapshot!(err, @"invalid value for 'depth' in section '[clone]': must be a positive number");
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[global]\nclone_dri = \"/src\"").is_err());
    assert!(Config::parse("[unknown]\nkey = 1").is_err());
}

#[test]
fn test_bad_enum_value() {
    assert!(Config::parse("[global]\nprogress = \"fancy\"").is_err());
    assert!(Config::parse("[global]\npost_clone_failure = \"ignore\"").is_err());
}

#[test]
fn test_format_options() {
    let mut config = Config::default();
    config.global.history_file = Some(PathBuf::from("/tmp/h.json"));
    config.clone.depth = Some(3);

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    clone.depth                = 3
    global.history_file        = /tmp/h.json
    global.history_limit       = 20
    global.post_clone_failure  = report
    global.progress            = bar
    hosting.github_api_url     = https://api.github.com
    hosting.gitlab_url         = https://gitlab.com
    hosting.per_page           = 30
    network.probe_timeout_secs = 5
    network.probe_url          = https://github.com
    network.skip_probe         = false
    ");
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\nhistory_limit = 3")
        .add_toml_file_optional("/definitely/not/here/gittty.toml");

    assert_eq!(loader.loaded_files().len(), 1, "missing optional files are not listed");
    assert_eq!(loader.format_loaded_files(), ["1. [string] <string>"]);
}

#[test]
fn test_config_loader_add_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[clone]\nbranch = \"dev\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.clone.branch.as_deref(), Some("dev"));
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    assert!(Config::from_file("/definitely/not/here/gittty.toml").is_err());
}

#[test]
fn test_config_loader_layered_sources() {
    let mut base = tempfile::NamedTempFile::new().unwrap();
    writeln!(base, "[clone]\nbranch = \"base\"\ndepth = 10").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_str("[clone]\ndepth = 2")
        .set("network.skip_probe", "true")
        .build()
        .unwrap();

    assert_eq!(config.clone.branch.as_deref(), Some("base"));
    assert_eq!(config.clone.depth, Some(2));
    assert!(config.network.skip_probe);
}

#[test]
fn test_config_loader_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\nprogress = \"bar\"")
        .set("global.progress", "silent")
        .set("clone.depth", "4")
        .build()
        .unwrap();

    assert_eq!(config.global.progress, ProgressMode::Silent);
    assert_eq!(config.clone.depth, Some(4));
}

#[test]
fn test_config_loader_override_validated() {
    let result = ConfigLoader::new().set("global.history_limit", "0").build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("GITTTYTEST_NETWORK__PROBE_TIMEOUT_SECS", "9");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[network]\nprobe_timeout_secs = 1")
        .with_env_prefix("GITTTYTEST")
        .build()
        .unwrap();

    // SAFETY: see above.
    unsafe {
        std::env::remove_var("GITTTYTEST_NETWORK__PROBE_TIMEOUT_SECS");
    }

    assert_eq!(config.network.probe_timeout_secs, 9);
}

#[test]
fn test_hosting_section() {
    let config = Config::parse(
        "[hosting]\ngitlab_url = \"https://git.example.com/\"\ngitlab_token = \"glpat-secret\"\nper_page = 5",
    )
    .unwrap();

    let client = config.hosting_client(Service::GitLab);
    assert_eq!(client.api_url(), "https://git.example.com/api/v4");
    assert!(client.has_token());
    assert_eq!(config.hosting.per_page, 5);

    let options = config.format_options().join("\n");
    assert!(options.contains("hosting.gitlab_token       = <set>"), "{options}");
    assert!(!options.contains("glpat-secret"));
}
