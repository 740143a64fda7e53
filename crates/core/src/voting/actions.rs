//! The action seam between the voting UI state and whatever executes votes.

use async_trait::async_trait;
use pitchboard_common::VoteError;
use pitchboard_db::entities::vote::VoteType;
use std::sync::Arc;

use crate::services::session::Session;
use crate::services::vote::{GetUserVoteInput, RemoveVoteInput, SubmitVoteInput, VoteService};
use crate::voting::UserVote;

/// Vote actions as seen by a single viewer.
#[async_trait]
pub trait VoteActions: Send + Sync {
    /// Cast or change the viewer's vote.
    async fn submit_vote(&self, startup_id: &str, vote_type: VoteType) -> Result<(), VoteError>;

    /// Retract the viewer's vote.
    async fn remove_vote(&self, startup_id: &str) -> Result<(), VoteError>;

    /// Fetch the viewer's vote on a startup.
    async fn get_user_vote(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<Option<UserVote>, VoteError>;
}

#[async_trait]
impl<T: VoteActions + ?Sized> VoteActions for Arc<T> {
    async fn submit_vote(&self, startup_id: &str, vote_type: VoteType) -> Result<(), VoteError> {
        (**self).submit_vote(startup_id, vote_type).await
    }

    async fn remove_vote(&self, startup_id: &str) -> Result<(), VoteError> {
        (**self).remove_vote(startup_id).await
    }

    async fn get_user_vote(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<Option<UserVote>, VoteError> {
        (**self).get_user_vote(startup_id, user_id).await
    }
}

/// In-process actions bound to one viewer's session.
#[derive(Clone)]
pub struct SessionVoteActions {
    service: VoteService,
    session: Option<Session>,
}

impl SessionVoteActions {
    #[must_use]
    pub const fn new(service: VoteService, session: Option<Session>) -> Self {
        Self { service, session }
    }
}

#[async_trait]
impl VoteActions for SessionVoteActions {
    async fn submit_vote(&self, startup_id: &str, vote_type: VoteType) -> Result<(), VoteError> {
        self.service
            .submit_vote(
                self.session.as_ref(),
                SubmitVoteInput::new(startup_id, vote_type),
            )
            .await
            .map(|_| ())
    }

    async fn remove_vote(&self, startup_id: &str) -> Result<(), VoteError> {
        self.service
            .remove_vote(
                self.session.as_ref(),
                RemoveVoteInput {
                    startup_id: startup_id.to_string(),
                },
            )
            .await
    }

    async fn get_user_vote(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<Option<UserVote>, VoteError> {
        self.service
            .get_user_vote(
                self.session.as_ref(),
                GetUserVoteInput {
                    startup_id: startup_id.to_string(),
                    user_id: user_id.to_string(),
                },
            )
            .await
    }
}
