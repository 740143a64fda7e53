//! Client-side voting state for one startup page.
//!
//! Seeded from server-rendered props, then updated optimistically from
//! click outcomes. The state is never re-fetched; another tab's votes show
//! up on the next page load.

use pitchboard_common::VoteError;
use pitchboard_db::entities::vote::VoteType;
use serde::{Deserialize, Serialize};

use crate::voting::{ButtonView, ClickOutcome, UserVote, VoteActions, VoteButtons, VoteCounts, VoteDelta, VoteDisplay};

/// Initial props rendered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingProps {
    pub startup_id: String,
    pub user_id: Option<String>,
    pub initial_votes: VoteCounts,
    pub initial_user_vote: Option<UserVote>,
}

/// What the section shows below the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Controls {
    SignIn {
        prompt: &'static str,
        detail: &'static str,
    },
    Buttons {
        prompt: &'static str,
        up: ButtonView,
        down: ButtonView,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub title: &'static str,
    pub display: VoteDisplay,
    pub error_message: Option<&'static str>,
    pub controls: Controls,
}

/// Optimistic vote state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingSection {
    startup_id: String,
    counts: VoteCounts,
    user_vote: Option<UserVote>,
    error: Option<VoteError>,
    authenticated: bool,
}

impl VotingSection {
    #[must_use]
    pub fn new(props: VotingProps) -> Self {
        Self {
            startup_id: props.startup_id,
            counts: props.initial_votes,
            user_vote: props.initial_user_vote,
            error: None,
            authenticated: props.user_id.is_some_and(|id| !id.is_empty()),
        }
    }

    #[must_use]
    pub fn startup_id(&self) -> &str {
        &self.startup_id
    }

    #[must_use]
    pub const fn counts(&self) -> VoteCounts {
        self.counts
    }

    #[must_use]
    pub const fn user_vote(&self) -> Option<&UserVote> {
        self.user_vote.as_ref()
    }

    /// The viewer's current vote type.
    #[must_use]
    pub fn current_vote(&self) -> Option<VoteType> {
        self.user_vote.as_ref().and_then(|v| v.vote_type)
    }

    #[must_use]
    pub const fn error(&self) -> Option<VoteError> {
        self.error
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Apply a successful click's delta.
    pub fn apply_vote_change(&mut self, delta: VoteDelta) {
        self.counts = self.counts.apply(delta);

        match delta.resulting_vote() {
            Some(Some(vote_type)) => {
                let id = self.user_vote.take().and_then(|v| v.id);
                self.user_vote = Some(UserVote {
                    id,
                    vote_type: Some(vote_type),
                });
            }
            Some(None) => self.user_vote = None,
            None => {}
        }

        self.error = None;
    }

    pub fn apply_vote_error(&mut self, error: VoteError) {
        self.error = Some(error);
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(VoteError::user_message)
    }

    /// Click a button and fold the outcome into the state.
    ///
    /// Anonymous viewers have no buttons; nothing is invoked for them.
    pub async fn vote<A: VoteActions>(
        &mut self,
        buttons: &VoteButtons<A>,
        vote_type: VoteType,
    ) -> ClickOutcome {
        if !self.authenticated {
            return ClickOutcome::Suppressed;
        }

        let outcome = buttons.click(vote_type, self.current_vote()).await;
        match outcome {
            ClickOutcome::Applied(delta) => self.apply_vote_change(delta),
            ClickOutcome::Failed(error) => self.apply_vote_error(error),
            ClickOutcome::Suppressed => {}
        }
        outcome
    }

    #[must_use]
    pub fn view<A: VoteActions>(&self, buttons: &VoteButtons<A>) -> SectionView {
        let controls = if self.authenticated {
            let current = self.current_vote();
            Controls::Buttons {
                prompt: "Cast your vote on this startup:",
                up: buttons.button_view(VoteType::Up, current),
                down: buttons.button_view(VoteType::Down, current),
            }
        } else {
            Controls::SignIn {
                prompt: "Want to vote on this startup?",
                detail: "Sign in to share your opinion with the community.",
            }
        };

        SectionView {
            title: "Community Votes",
            display: VoteDisplay::new(self.counts),
            error_message: self.error_message(),
            controls,
        }
    }
}
