// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Clone | Pull | History | Options | Inis | Version
//! Ctrl-C --> CancellationToken --> in-flight git is killed
//! ```

use std::process::ExitCode;

use gittty::cli::global::GlobalOptions;
use gittty::cli::{self, Command};
use gittty::cmd::clone::run_clone_command;
use gittty::cmd::config::{run_inis_command, run_options_command};
use gittty::cmd::history::run_history_command;
use gittty::cmd::pull::run_pull_command;
use gittty::cmd::repos::run_repos_command;
use gittty::config::loader::ConfigLoader;
use gittty::config::{CONFIG_FILE, Config, ENV_PREFIX};
use gittty::logging::init_logging;
use gittty::logging::{LogConfig, LogLevel};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping git");
            on_ctrl_c.cancel();
        }
    });

    dispatch_command(&cli, &cancel).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::TRACE);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli, cancel: &CancellationToken) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Clone(args)) => match load_config(&cli.global) {
            Ok(config) => run_clone_command(args, &config, cancel).await,
            Err(e) => Err(e),
        },
        Some(Command::Pull(args)) => match load_config(&cli.global) {
            Ok(config) => run_pull_command(args, &config, cancel).await,
            Err(e) => Err(e),
        },
        Some(Command::History(args)) => {
            load_config(&cli.global).and_then(|config| run_history_command(args, &config))
        }
        Some(Command::Repos(args)) => match load_config(&cli.global) {
            Ok(config) => tokio::select! {
                result = run_repos_command(args, &config) => result,
                () = cancel.cancelled() => Err(anyhow::anyhow!("cancelled")),
            },
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        if let Some(user_file) = Config::user_file() {
            loader = loader.add_toml_file_optional(user_file);
        }
        loader = loader.add_toml_file_optional(CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> gittty::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides()? {
        loader = loader.set(&key, value);
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
