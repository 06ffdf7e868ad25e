// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone/pull orchestration.
//!
//! ```text
//! Orchestrator::clone(url, path, options)
//!   git installed? -> connectivity hint -> GitExecutor::execute(clone)
//!     events -> ProgressSink
//!   classify(exit, output, hint)
//!   success + post_clone_script -> run_script (Report | Fail policy)
//!
//! Orchestrator::pull(path, fallback)
//!   not a work tree -> clone(fallback) or RepositoryNotFound
//!   execute(pull) -> classify
//!     LocalChangesWouldBeOverwritten -> StashCycle
//!        confirm -> stash -> pull -> stash pop
//!
//! every path ends in an OperationResult; nothing here returns Err
//! ```
//!
//! One operation runs at a time per orchestrator call, and callers must not
//! run two operations against the same working tree concurrently.

pub mod executor;
pub mod orchestrator;
pub mod probe;
pub mod stash;


use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::classify::Classification;

pub use executor::{ExecOutcome, GitExecutor, ShellGit};
pub use orchestrator::Orchestrator;
pub use stash::{StashCycle, StashEvent, StashState};

/// The git subcommands the orchestrator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcommand {
    Clone,
    Pull,
    Stash,
    StashPop,
}

impl Subcommand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Pull => "pull",
            Self::Stash => "stash",
            Self::StashPop => "stash pop",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a failing post-clone script does to the overall result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PostClonePolicy {
    /// Record the failure; the clone stays successful.
    #[default]
    Report,
    /// Mark the whole operation failed.
    Fail,
}

impl PostClonePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Fail => "fail",
        }
    }
}

/// Options recognized by `clone`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    pub branch: Option<String>,
    pub depth: Option<NonZeroU32>,
    pub post_clone_script: Option<PathBuf>,
    pub post_clone_policy: PostClonePolicy,
}

/// Where `pull` goes when the path is not a working tree yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneFallback {
    pub url: String,
    pub options: CloneOptions,
}

/// One invocation of a git subcommand.
#[derive(Debug, Clone)]
pub struct Operation {
    subcommand: Subcommand,
    path: PathBuf,
    url: Option<String>,
    branch: Option<String>,
    depth: Option<NonZeroU32>,
    started: Instant,
}

impl Operation {
    fn new(subcommand: Subcommand, path: &Path) -> Self {
        Self {
            subcommand,
            path: path.to_path_buf(),
            url: None,
            branch: None,
            depth: None,
            started: Instant::now(),
        }
    }

    /// `git clone` of `url` into `path`.
    #[must_use]
    pub fn clone_of(url: &str, path: &Path, options: &CloneOptions) -> Self {
        Self {
            url: Some(url.to_string()),
            branch: options.branch.clone(),
            depth: options.depth,
            ..Self::new(Subcommand::Clone, path)
        }
    }

    #[must_use]
    pub fn pull(path: &Path) -> Self {
        Self::new(Subcommand::Pull, path)
    }

    #[must_use]
    pub fn stash(path: &Path) -> Self {
        Self::new(Subcommand::Stash, path)
    }

    #[must_use]
    pub fn stash_pop(path: &Path) -> Self {
        Self::new(Subcommand::StashPop, path)
    }

    #[must_use]
    pub const fn subcommand(&self) -> Subcommand {
        self.subcommand
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub const fn started(&self) -> Instant {
        self.started
    }

    /// Directory git runs in. Clone names its target explicitly instead.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        match self.subcommand {
            Subcommand::Clone => None,
            _ => Some(&self.path),
        }
    }

    /// Arguments after `git`.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self.subcommand {
            Subcommand::Clone => vec!["clone".into(), "--progress".into()],
            Subcommand::Pull => vec!["pull".into(), "--progress".into()],
            Subcommand::Stash => vec![
                "stash".into(),
                "push".into(),
                "--message".into(),
                "gittty: auto-stash before pull".into(),
            ],
            Subcommand::StashPop => vec!["stash".into(), "pop".into()],
        };

        if self.subcommand == Subcommand::Clone {
            if let Some(depth) = self.depth {
                args.push("--depth".into());
                args.push(depth.to_string());
            }
            if let Some(branch) = &self.branch {
                args.push("--branch".into());
                args.push(branch.clone());
            }
            args.push("--".into());
            args.extend(self.url.clone());
            args.push(self.path.to_string_lossy().into_owned());
        }
        args
    }

    /// Short description for progress displays.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.url {
            Some(url) => format!("{} {url}", self.subcommand),
            None => format!("{} {}", self.subcommand, self.path.display()),
        }
    }
}

/// Exit code and output of one step inside an auto-stash cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub subcommand: Subcommand,
    /// `None` if the step never ran to completion.
    pub exit_code: Option<i32>,
    pub output: String,
}

/// How an auto-stash cycle went.
#[derive(Debug, Clone, Serialize)]
pub struct StashReport {
    state: StashState,
    history: Vec<StashState>,
    steps: Vec<StepRecord>,
    stash_retained: Option<bool>,
}

impl StashReport {
    #[must_use]
    pub const fn state(&self) -> StashState {
        self.state
    }

    #[must_use]
    pub fn history(&self) -> &[StashState] {
        &self.history
    }

    /// `stash`, retried `pull` and `stash pop`, as far as they ran.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Whether a stash entry still exists after a conflict or interruption.
    ///
    /// `None` when not probed (clean outcomes) or the probe failed.
    #[must_use]
    pub const fn stash_retained(&self) -> Option<bool> {
        self.stash_retained
    }

    /// Whether local changes were actually shelved at some point.
    #[must_use]
    pub fn stashed(&self) -> bool {
        self.history.contains(&StashState::StashedPullRetry)
    }
}

/// Result of the post-clone script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptOutcome {
    pub script: PathBuf,
    /// `None` if the script could not be started or was cancelled.
    pub exit_code: Option<i32>,
    pub output: String,
    pub success: bool,
}

/// Terminal outcome of a clone or pull.
#[derive(Debug, Clone)]
pub struct OperationResult {
    subcommand: Subcommand,
    path: PathBuf,
    success: bool,
    exit_code: Option<i32>,
    output: String,
    error: Option<Classification>,
    cancelled: bool,
    auto_stash: Option<StashReport>,
    post_clone: Option<ScriptOutcome>,
    routed_to_clone: bool,
    elapsed: Duration,
}

impl OperationResult {
    /// A result that has not run anything yet.
    fn pending(op: &Operation) -> Self {
        Self {
            subcommand: op.subcommand,
            path: op.path.clone(),
            success: false,
            exit_code: None,
            output: String::new(),
            error: None,
            cancelled: false,
            auto_stash: None,
            post_clone: None,
            routed_to_clone: false,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn subcommand(&self) -> Subcommand {
        self.subcommand
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Exit code of the last git process, if one ran to completion.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Everything git printed, in order, across all steps.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Classification> {
        self.error.as_ref()
    }

    /// Cancelled by the caller. Not an error and never classified.
    #[must_use]
    pub const fn cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub const fn auto_stash(&self) -> Option<&StashReport> {
        self.auto_stash.as_ref()
    }

    #[must_use]
    pub fn auto_stash_occurred(&self) -> bool {
        self.auto_stash.as_ref().is_some_and(StashReport::stashed)
    }

    #[must_use]
    pub const fn post_clone(&self) -> Option<&ScriptOutcome> {
        self.post_clone.as_ref()
    }

    /// `pull` found no working tree and cloned instead.
    #[must_use]
    pub const fn routed_to_clone(&self) -> bool {
        self.routed_to_clone
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The hint to show the user, if there is anything to do.
    #[must_use]
    pub fn remediation(&self) -> Option<&str> {
        if let Some(error) = &self.error {
            return Some(error.advice());
        }
        if let Some(guidance) = self.auto_stash.as_ref().and_then(|r| r.state.guidance()) {
            return Some(guidance);
        }
        self.post_clone
            .as_ref()
            .filter(|s| !s.success)
            .map(|_| "The repository was cloned, but the post-clone script failed. See its output above.")
    }
}
