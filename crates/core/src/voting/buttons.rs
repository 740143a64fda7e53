//! Vote buttons: click routing and the in-flight latch.
//!
//! Only one action runs at a time per button pair. A click that arrives
//! while another is in flight is dropped, not queued.

use pitchboard_common::VoteError;
use pitchboard_db::entities::vote::VoteType;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::voting::{VoteActions, VoteDelta};

const IDLE: u8 = 0;
const PENDING_UP: u8 = 1;
const PENDING_DOWN: u8 = 2;

const fn encode(vote_type: VoteType) -> u8 {
    match vote_type {
        VoteType::Up => PENDING_UP,
        VoteType::Down => PENDING_DOWN,
    }
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The action succeeded; apply this delta to the displayed counts.
    Applied(VoteDelta),
    /// The action failed; counts must not change.
    Failed(VoteError),
    /// The buttons were disabled or busy; nothing was invoked.
    Suppressed,
}

/// Render state for one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub vote_type: VoteType,
    pub label: &'static str,
    pub aria_label: &'static str,
    pub pressed: bool,
    pub loading: bool,
    pub disabled: bool,
}

/// Resets the latch on every exit path, including cancellation.
struct PendingGuard<'a>(&'a AtomicU8);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(IDLE, Ordering::Release);
    }
}

/// The up/down button pair for one startup.
pub struct VoteButtons<A> {
    startup_id: String,
    actions: A,
    disabled: bool,
    pending: AtomicU8,
}

impl<A: VoteActions> VoteButtons<A> {
    pub fn new(startup_id: impl Into<String>, actions: A) -> Self {
        Self {
            startup_id: startup_id.into(),
            actions,
            disabled: false,
            pending: AtomicU8::new(IDLE),
        }
    }

    /// Disable both buttons regardless of in-flight state.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn startup_id(&self) -> &str {
        &self.startup_id
    }

    #[must_use]
    pub const fn actions(&self) -> &A {
        &self.actions
    }

    /// The vote type whose request is in flight, if any.
    #[must_use]
    pub fn loading_vote(&self) -> Option<VoteType> {
        match self.pending.load(Ordering::Acquire) {
            PENDING_UP => Some(VoteType::Up),
            PENDING_DOWN => Some(VoteType::Down),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled || self.loading_vote().is_some()
    }

    /// Handle a click on `vote_type` given the viewer's current vote.
    ///
    /// Clicking the active button retracts; anything else submits.
    pub async fn click(&self, vote_type: VoteType, current: Option<VoteType>) -> ClickOutcome {
        if self.disabled {
            return ClickOutcome::Suppressed;
        }
        if self
            .pending
            .compare_exchange(IDLE, encode(vote_type), Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(startup_id = %self.startup_id, "Click suppressed while a vote is in flight");
            return ClickOutcome::Suppressed;
        }
        let _guard = PendingGuard(&self.pending);

        let result = if current == Some(vote_type) {
            self.actions.remove_vote(&self.startup_id).await
        } else {
            self.actions.submit_vote(&self.startup_id, vote_type).await
        };

        match result {
            Ok(()) => ClickOutcome::Applied(VoteDelta::for_click(current, vote_type)),
            Err(e) => {
                tracing::warn!(
                    startup_id = %self.startup_id,
                    vote_type = %vote_type,
                    error = %e,
                    "Vote action failed"
                );
                ClickOutcome::Failed(e)
            }
        }
    }

    #[must_use]
    pub fn button_view(&self, vote_type: VoteType, current: Option<VoteType>) -> ButtonView {
        let pressed = current == Some(vote_type);
        let (label, aria_label) = match (vote_type, pressed) {
            (VoteType::Up, false) => ("Up", "Vote thumbs up"),
            (VoteType::Up, true) => ("Voted", "Remove thumbs up vote"),
            (VoteType::Down, false) => ("Down", "Vote thumbs down"),
            (VoteType::Down, true) => ("Voted", "Remove thumbs down vote"),
        };

        ButtonView {
            vote_type,
            label,
            aria_label,
            pressed,
            loading: self.loading_vote() == Some(vote_type),
            disabled: self.is_disabled(),
        }
    }
}
