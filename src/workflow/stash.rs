// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Auto-stash state machine.
//!
//! ```text
//! Idle --PullRejected--> PullRejected --Confirmed--> Stashing
//!                             |                        |    \
//!                          Declined            StashSucceeded StashFailed
//!                             v                        v        v
//!                         [Declined]           StashedPullRetry [Aborted]
//!                                                      |
//!                                      RetrySucceeded / RetryFailed
//!                                                      v
//!                                                 Reapplying
//!                                        PopSucceeded /  \ PopConflicted / PopFailed
//!                                                    v    v
//!                                           [Resolved]  [ReapplyConflict]
//!
//! any non-terminal --Cancelled--> [Interrupted]
//! ```
//!
//! A cycle is owned by one pull and never re-entered once terminal.

use std::fmt;

use serde::Serialize;

use crate::error::StashError;

/// Where an auto-stash cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StashState {
    Idle,
    PullRejected,
    Stashing,
    StashedPullRetry,
    Reapplying,
    /// Changes are back on top of the pulled commits.
    Resolved,
    /// `stash pop` did not apply cleanly; the stash entry is kept.
    ReapplyConflict,
    /// The user said no; nothing was touched.
    Declined,
    /// `git stash` failed; nothing was touched.
    Aborted,
    /// Cancelled partway; a stash entry may remain.
    Interrupted,
}

impl StashState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Resolved | Self::ReapplyConflict | Self::Declined | Self::Aborted | Self::Interrupted
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PullRejected => "pull rejected",
            Self::Stashing => "stashing",
            Self::StashedPullRetry => "retrying pull",
            Self::Reapplying => "reapplying stash",
            Self::Resolved => "resolved",
            Self::ReapplyConflict => "reapply conflict",
            Self::Declined => "declined",
            Self::Aborted => "aborted",
            Self::Interrupted => "interrupted",
        }
    }

    /// What the user has to do next, for the states that need them.
    #[must_use]
    pub const fn guidance(self) -> Option<&'static str> {
        match self {
            Self::ReapplyConflict => Some(
                "Your stashed changes conflict with the pulled commits. Resolve the conflicts, \
                 then run `git stash drop` once you no longer need the stash entry.",
            ),
            Self::Interrupted => Some(
                "The operation was interrupted mid auto-stash. Check `git stash list`; \
                 restore your changes with `git stash pop`.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for StashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened during the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashEvent {
    PullRejected,
    Confirmed,
    Declined,
    StashSucceeded,
    StashFailed,
    RetrySucceeded,
    RetryFailed,
    PopSucceeded,
    PopConflicted,
    PopFailed,
    Cancelled,
}

impl fmt::Display for StashEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One auto-stash cycle with the states it went through.
#[derive(Debug, Clone)]
pub struct StashCycle {
    state: StashState,
    history: Vec<StashState>,
    retry_succeeded: Option<bool>,
}

impl Default for StashCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl StashCycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: StashState::Idle,
            history: vec![StashState::Idle],
            retry_succeeded: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> StashState {
        self.state
    }

    /// Every state visited, starting with `Idle`.
    #[must_use]
    pub fn history(&self) -> &[StashState] {
        &self.history
    }

    /// Outcome of the retried pull, once it ran.
    #[must_use]
    pub const fn retry_succeeded(&self) -> Option<bool> {
        self.retry_succeeded
    }

    /// Applies `event` and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `StashError::InvalidTransition` if `event` is not accepted in
    /// the current state (including any event after a terminal state).
    pub fn advance(&mut self, event: StashEvent) -> Result<StashState, StashError> {
        use StashEvent as E;
        use StashState as S;

        let next = match (self.state, event) {
            (from, E::Cancelled) if !from.is_terminal() => S::Interrupted,
            (S::Idle, E::PullRejected) => S::PullRejected,
            (S::PullRejected, E::Confirmed) => S::Stashing,
            (S::PullRejected, E::Declined) => S::Declined,
            (S::Stashing, E::StashSucceeded) => S::StashedPullRetry,
            (S::Stashing, E::StashFailed) => S::Aborted,
            (S::StashedPullRetry, E::RetrySucceeded) => {
                self.retry_succeeded = Some(true);
                S::Reapplying
            }
            (S::StashedPullRetry, E::RetryFailed) => {
                self.retry_succeeded = Some(false);
                S::Reapplying
            }
            (S::Reapplying, E::PopSucceeded) => S::Resolved,
            (S::Reapplying, E::PopConflicted | E::PopFailed) => S::ReapplyConflict,
            (from, event) => {
                return Err(StashError::InvalidTransition {
                    from: from.to_string(),
                    event: event.to_string(),
                });
            }
        };

        self.state = next;
        self.history.push(next);
        Ok(next)
    }
}
