// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |       |
//!    v       v
//! Console   File (optional)
//! stderr    non_blocking
//! EnvFilter EnvFilter
//!           text | json
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogLevel:  0=OFF  1=ERROR  2=WARN  3=INFO
//!            4=DEBUG  5=TRACE (raw git output)  6=DUMP(+libs)
//! ```

use anyhow::Context;
use bon::Builder;
use std::path::Path;
use tracing::{Span, info_span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{ConfigError, Result};

/// Log level (0-6) for configuration.
///
/// - 0: Silent
/// - 1: Error
/// - 2: Warn
/// - 3: Info (default)
/// - 4: Debug, shows every git command line
/// - 5: Trace, also shows every raw line git writes
/// - 6: Dump, trace output from dependencies too
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// Create a new `LogLevel` from a u8 value (0-6).
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the level is greater than 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        if level <= 6 {
            Ok(Self(level))
        } else {
            Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "log_level".to_string(),
                message: format!("log level must be 0-6, got {level}"),
            })
        }
    }

    /// Convert from u8 value, returning None if out of range.
    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 6 { Some(Self(level)) } else { None }
    }

    /// Convert to `EnvFilter` directive string.
    ///
    /// Below `DUMP`, dependency crates are capped at `warn` so that
    /// `reqwest`/`hyper` chatter does not drown the git output.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "warn,gittty=info",
            4 => "warn,gittty=debug",
            5 => "warn,gittty=trace",
            _ => "trace",
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Output format of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Picks JSON for `*.json` / `*.jsonl` files and text otherwise.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json" | "jsonl") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    /// Get the console log level.
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    /// Get the file log level.
    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    /// Get the log file path if set.
    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Get the log file format, derived from its extension.
    #[must_use]
    pub fn file_format(&self) -> LogFormat {
        self.log_file()
            .map_or(LogFormat::Text, |f| LogFormat::for_path(Path::new(f)))
    }

    /// Check if target (module path) should be shown in output.
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }
}

/// RAII guard that keeps the logging system alive.
/// When dropped, flushes all pending log writes.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Console output goes to stderr so it shares the terminal with the
/// progress display rather than the command's own stdout.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use gittty::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::INFO)
///     .with_file_level(LogLevel::TRACE)
///     .with_log_file("gittty.log".to_string())
///     .build();
///
/// let _guard = init_logging(&config).expect("Failed to initialize logging");
/// tracing::info!("Logging initialized");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_filter = EnvFilter::new(config.console_level().to_filter_string());

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target())
        .with_level(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let mut file_guard = None;
    let file_layer = if let Some(log_path) = config.log_file() {
        let log_path = Path::new(log_path);

        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::File::create(log_path)
            .with_context(|| format!("failed to create log file {}", log_path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        file_guard = Some(guard);

        let file_filter = EnvFilter::new(config.file_level().to_filter_string());
        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE);

        let layer = match config.file_format() {
            LogFormat::Json => layer.json().with_filter(file_filter).boxed(),
            LogFormat::Text => layer.with_filter(file_filter).boxed(),
        };
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Span covering one git operation, so every line logged while it runs
/// carries the subcommand and the working tree it targets.
#[must_use]
pub fn operation_span(subcommand: &str, path: &Path) -> Span {
    info_span!("git", op = subcommand, path = %path.display())
}

#[cfg(test)]
mod tests;
