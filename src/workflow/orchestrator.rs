// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Drives clone and pull end to end, including the auto-stash cycle.

use std::path::Path;

use bon::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, warn};

use super::executor::{ExecOutcome, GitExecutor};
use super::probe::{ConfirmationSource, ConnectivityProbe, ExecutableProbe, FilesystemProbe};
use super::stash::{StashCycle, StashEvent, StashState};
use super::{
    CloneFallback, CloneOptions, Operation, OperationResult, PostClonePolicy, ScriptOutcome,
    StashReport, StepRecord, Subcommand,
};
use crate::classify::{Classification, ConnectivityHint, ErrorKind, classify, classify_spawn_error};
use crate::error::{ProcessError, StashError};
use crate::logging::operation_span;
use crate::progress::ProgressSink;

/// What `git stash push` prints when there is nothing to shelve.
const NOTHING_TO_STASH: &str = "No local changes to save";

/// Clone/pull orchestrator.
///
/// Owns its collaborators; every public operation returns an
/// [`OperationResult`], never an error.
#[derive(Builder)]
pub struct Orchestrator {
    executor: Box<dyn GitExecutor>,
    filesystem: Box<dyn FilesystemProbe>,
    connectivity: Box<dyn ConnectivityProbe>,
    executables: Box<dyn ExecutableProbe>,
    confirmation: Box<dyn ConfirmationSource>,
    progress: Box<dyn ProgressSink>,
    /// Do not ask the connectivity probe before cloning.
    #[builder(default)]
    skip_connectivity_probe: bool,
}

/// How one auto-stash step ended.
enum Step {
    Finished(ExecOutcome),
    Cancelled,
    Failed(ProcessError),
}

impl Orchestrator {
    /// Clones `url` into `path`, then runs the post-clone script if any.
    pub async fn clone(
        &self,
        url: &str,
        path: &Path,
        options: &CloneOptions,
        cancel: &CancellationToken,
    ) -> OperationResult {
        let op = Operation::clone_of(url, path, options);
        self.run_clone(&op, options, cancel)
            .instrument(operation_span(Subcommand::Clone.as_str(), path))
            .await
    }

    /// Pulls the working tree at `path`.
    ///
    /// With a `fallback`, a path that is not a working tree yet is cloned
    /// instead.
    pub async fn pull(
        &self,
        path: &Path,
        fallback: Option<&CloneFallback>,
        cancel: &CancellationToken,
    ) -> OperationResult {
        let op = Operation::pull(path);

        if !self.filesystem.is_git_repository(path) {
            if let Some(fallback) = fallback {
                info!(path = %path.display(), url = %fallback.url, "not a working tree, cloning instead");
                let mut result = self.clone(&fallback.url, path, &fallback.options, cancel).await;
                result.routed_to_clone = true;
                return result;
            }

            let advice = if self.filesystem.exists(path) {
                format!(
                    "'{}' is not a git working tree. Pass a URL to clone into it instead.",
                    path.display()
                )
            } else {
                format!("'{}' does not exist. Pass a URL to clone it there.", path.display())
            };
            let mut result = OperationResult::pending(&op);
            result.error = Some(Classification::new(ErrorKind::RepositoryNotFound, advice));
            return finish(result, &op);
        }

        self.run_pull(&op, cancel)
            .instrument(operation_span(Subcommand::Pull.as_str(), path))
            .await
    }

    async fn run_clone(
        &self,
        op: &Operation,
        options: &CloneOptions,
        cancel: &CancellationToken,
    ) -> OperationResult {
        let mut result = OperationResult::pending(op);
        if let Some(missing) = self.require_git() {
            result.error = Some(missing);
            return finish(result, op);
        }

        let hint = self.connectivity_hint(cancel).await;
        if cancel.is_cancelled() {
            result.cancelled = true;
            return finish(result, op);
        }

        info!(url = op.url().unwrap_or_default(), "cloning");
        match self.executor.execute(op, self.progress.as_ref(), cancel).await {
            Err(e) => {
                warn!(error = %e, "could not start git");
                result.output = e.to_string();
                result.error = Some(classify_spawn_error(&e));
            }
            Ok(outcome) if outcome.stopped_by(cancel) => {
                warn!("clone cancelled");
                result.output = outcome.output;
                result.cancelled = true;
            }
            Ok(outcome) => {
                result.exit_code = Some(outcome.exit_code);
                result.error = classify(outcome.exit_code, &outcome.output, hint);
                result.success = result.error.is_none();
                result.output = outcome.output;
            }
        }

        if result.success
            && let Some(script) = &options.post_clone_script
        {
            let outcome = self.post_clone(script, op.path(), cancel).await;
            if !outcome.success {
                warn!(script = %outcome.script.display(), exit_code = ?outcome.exit_code, "post-clone script failed");
                if options.post_clone_policy == PostClonePolicy::Fail {
                    result.success = false;
                }
            }
            result.post_clone = Some(outcome);
        }

        if result.success {
            info!("clone finished");
        }
        finish(result, op)
    }

    async fn run_pull(&self, op: &Operation, cancel: &CancellationToken) -> OperationResult {
        let mut result = OperationResult::pending(op);
        if let Some(missing) = self.require_git() {
            result.error = Some(missing);
            return finish(result, op);
        }
        if cancel.is_cancelled() {
            result.cancelled = true;
            return finish(result, op);
        }

        info!("pulling");
        let first = match self.executor.execute(op, self.progress.as_ref(), cancel).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "could not start git");
                result.output = e.to_string();
                result.error = Some(classify_spawn_error(&e));
                return finish(result, op);
            }
        };
        if first.stopped_by(cancel) {
            warn!("pull cancelled");
            result.output = first.output;
            result.cancelled = true;
            return finish(result, op);
        }

        result.exit_code = Some(first.exit_code);
        match classify(first.exit_code, &first.output, ConnectivityHint::Unchecked) {
            None => {
                info!("pull finished");
                result.success = true;
                result.output = first.output;
            }
            Some(rejection) if rejection.kind().triggers_auto_stash() => {
                result = self.auto_stash(op, result, first, rejection, cancel).await;
            }
            Some(other) => {
                result.output = first.output;
                result.error = Some(other);
            }
        }
        finish(result, op)
    }

    /// Runs one auto-stash cycle after `rejected` and folds it into `result`.
    async fn auto_stash(
        &self,
        op: &Operation,
        mut result: OperationResult,
        rejected: ExecOutcome,
        rejection: Classification,
        cancel: &CancellationToken,
    ) -> OperationResult {
        let path = op.path();
        let mut cycle = StashCycle::new();
        let mut steps = Vec::new();

        let retry_error = match self.drive(path, &mut cycle, &mut steps, cancel).await {
            Ok(retry_error) => retry_error,
            Err(e) => {
                error!(error = %e, "auto-stash stopped");
                Some(Classification::new(ErrorKind::Unclassified, e.to_string()))
            }
        };
        let state = cycle.state();

        let stash_retained = if matches!(state, StashState::ReapplyConflict | StashState::Interrupted)
            && cycle.history().contains(&StashState::Stashing)
        {
            match self.filesystem.has_stash_entries(path) {
                Ok(retained) => Some(retained),
                Err(e) => {
                    warn!(error = %e, "could not inspect the stash");
                    None
                }
            }
        } else {
            None
        };

        result.success = cycle.retry_succeeded() == Some(true) && state == StashState::Resolved;
        result.cancelled = state == StashState::Interrupted;
        result.error = match state {
            StashState::Declined | StashState::Aborted => Some(rejection),
            StashState::Interrupted => None,
            _ => retry_error,
        };
        result.exit_code = steps
            .iter()
            .rev()
            .find(|s| s.subcommand == Subcommand::Pull)
            .and_then(|s| s.exit_code)
            .or(Some(rejected.exit_code));

        let mut output = rejected.output;
        for step in &steps {
            if step.output.is_empty() {
                continue;
            }
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&step.output);
        }
        result.output = output;

        info!(state = %state, "auto-stash finished");
        result.auto_stash = Some(StashReport {
            state,
            history: cycle.history().to_vec(),
            steps,
            stash_retained,
        });
        result
    }

    /// Walks `cycle` to a terminal state.
    ///
    /// Returns the classification of a failed retry, if any.
    async fn drive(
        &self,
        path: &Path,
        cycle: &mut StashCycle,
        steps: &mut Vec<StepRecord>,
        cancel: &CancellationToken,
    ) -> Result<Option<Classification>, StashError> {
        cycle.advance(StashEvent::PullRejected)?;

        let prompt = format!(
            "Local changes in '{}' block the pull. Stash them, pull, and reapply?",
            path.display()
        );
        let confirmed = tokio::select! {
            answer = self.confirmation.confirm(&prompt) => answer,
            () = cancel.cancelled() => {
                cycle.advance(StashEvent::Cancelled)?;
                return Ok(None);
            }
        };
        if !confirmed {
            info!("auto-stash declined");
            cycle.advance(StashEvent::Declined)?;
            return Ok(None);
        }
        cycle.advance(StashEvent::Confirmed)?;

        match self.step(Operation::stash(path), steps, cancel).await {
            Step::Cancelled => {
                cycle.advance(StashEvent::Cancelled)?;
                return Ok(None);
            }
            Step::Finished(o) if o.success() && !o.output.contains(NOTHING_TO_STASH) => {
                info!("local changes stashed");
                cycle.advance(StashEvent::StashSucceeded)?;
            }
            _ => {
                warn!("git stash failed, working tree left as it was");
                cycle.advance(StashEvent::StashFailed)?;
                return Ok(None);
            }
        }

        let retry_error = match self.step(Operation::pull(path), steps, cancel).await {
            Step::Cancelled => {
                cycle.advance(StashEvent::Cancelled)?;
                return Ok(None);
            }
            Step::Finished(o) if o.success() => {
                info!("pull succeeded after stashing");
                cycle.advance(StashEvent::RetrySucceeded)?;
                None
            }
            Step::Finished(o) => {
                warn!(exit_code = o.exit_code, "pull failed again after stashing");
                cycle.advance(StashEvent::RetryFailed)?;
                classify(o.exit_code, &o.output, ConnectivityHint::Unchecked)
            }
            Step::Failed(e) => {
                cycle.advance(StashEvent::RetryFailed)?;
                Some(classify_spawn_error(&e))
            }
        };

        match self.step(Operation::stash_pop(path), steps, cancel).await {
            Step::Cancelled => {
                cycle.advance(StashEvent::Cancelled)?;
            }
            Step::Finished(o) if o.success() => {
                info!("local changes restored");
                cycle.advance(StashEvent::PopSucceeded)?;
            }
            Step::Finished(o) if o.output.to_lowercase().contains("conflict") => {
                warn!("stash pop conflicted, stash entry kept");
                cycle.advance(StashEvent::PopConflicted)?;
            }
            _ => {
                warn!("stash pop failed");
                cycle.advance(StashEvent::PopFailed)?;
            }
        }
        Ok(retry_error)
    }

    /// Runs one step of the cycle and records it.
    async fn step(&self, op: Operation, steps: &mut Vec<StepRecord>, cancel: &CancellationToken) -> Step {
        if cancel.is_cancelled() {
            return Step::Cancelled;
        }

        let subcommand = op.subcommand();
        match self.executor.execute(&op, self.progress.as_ref(), cancel).await {
            Ok(outcome) => {
                let stopped = outcome.stopped_by(cancel);
                steps.push(StepRecord {
                    subcommand,
                    exit_code: (!stopped).then_some(outcome.exit_code),
                    output: outcome.output.clone(),
                });
                if stopped {
                    Step::Cancelled
                } else {
                    Step::Finished(outcome)
                }
            }
            Err(e) => {
                warn!(op = %subcommand, error = %e, "could not start git");
                steps.push(StepRecord {
                    subcommand,
                    exit_code: None,
                    output: e.to_string(),
                });
                Step::Failed(e)
            }
        }
    }

    async fn post_clone(&self, script: &Path, repo: &Path, cancel: &CancellationToken) -> ScriptOutcome {
        let script = std::path::absolute(script).unwrap_or_else(|_| script.to_path_buf());
        info!(script = %script.display(), "running post-clone script");

        match self.executor.run_script(&script, repo, cancel).await {
            Ok(outcome) => ScriptOutcome {
                exit_code: (!outcome.cancelled).then_some(outcome.exit_code),
                success: outcome.success(),
                output: outcome.output,
                script,
            },
            Err(e) => ScriptOutcome {
                exit_code: None,
                output: e.to_string(),
                success: false,
                script,
            },
        }
    }

    fn require_git(&self) -> Option<Classification> {
        if self.executables.git_is_installed() {
            return None;
        }
        warn!("git not found in PATH");
        Some(classify_spawn_error(&ProcessError::ExecutableNotFound {
            name: crate::git::cmd::GIT.to_string(),
        }))
    }

    async fn connectivity_hint(&self, cancel: &CancellationToken) -> ConnectivityHint {
        if self.skip_connectivity_probe {
            return ConnectivityHint::Unchecked;
        }
        let hint = tokio::select! {
            online = self.connectivity.has_internet() => ConnectivityHint::from(online),
            () = cancel.cancelled() => ConnectivityHint::Unchecked,
        };
        if hint == ConnectivityHint::Offline {
            warn!("connectivity probe failed, treating clone failures as network errors");
        }
        hint
    }
}

fn finish(mut result: OperationResult, op: &Operation) -> OperationResult {
    result.elapsed = op.started().elapsed();
    result
}
