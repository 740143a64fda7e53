//! Vote service: the server side of voting.
//!
//! Every action takes the request's [`Session`] explicitly and returns a
//! [`VoteError`] value on failure. A missing session fails before any store
//! access, and input validation happens before any store access too.

use chrono::Utc;
use pitchboard_common::{AppResult, IdGenerator, VoteError};
use pitchboard_db::{
    entities::vote::{self, VoteType},
    repositories::{StartupRepository, VoteRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::services::session::Session;
use crate::voting::{UserVote, VoteCounts};

/// Input for [`VoteService::submit_vote`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteInput {
    #[validate(length(min = 1, message = "Startup ID is required"))]
    pub startup_id: String,
    #[validate(custom(function = validate_vote_type))]
    pub vote_type: String,
}

impl SubmitVoteInput {
    #[must_use]
    pub fn new(startup_id: impl Into<String>, vote_type: VoteType) -> Self {
        Self {
            startup_id: startup_id.into(),
            vote_type: vote_type.as_str().to_string(),
        }
    }
}

/// Input for [`VoteService::remove_vote`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveVoteInput {
    #[validate(length(min = 1, message = "Startup ID is required"))]
    pub startup_id: String,
}

/// Input for [`VoteService::get_user_vote`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetUserVoteInput {
    #[validate(length(min = 1, message = "Startup ID is required"))]
    pub startup_id: String,
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}

fn validate_vote_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<VoteType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("vote_type").with_message("Vote type must be either 'up' or 'down'".into()))
}

/// How a submitted vote changed the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No previous vote; a record was created.
    Created,
    /// The existing record's type was flipped.
    Changed { from: VoteType },
    /// The existing record already had this type. Nothing was written.
    Unchanged,
}

/// Result of a successful [`VoteService::submit_vote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedVote {
    pub vote: vote::Model,
    pub change: VoteChange,
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    startup_repo: StartupRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: VoteRepository, startup_repo: StartupRepository) -> Self {
        Self {
            vote_repo,
            startup_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast or change the session user's vote on a startup.
    ///
    /// The write is an upsert keyed on `(user_id, startup_id)`, so concurrent
    /// submissions by the same user never produce a second record. Submitting
    /// the type the user already has is a successful no-op.
    pub async fn submit_vote(
        &self,
        session: Option<&Session>,
        input: SubmitVoteInput,
    ) -> Result<SubmittedVote, VoteError> {
        let session = session.ok_or(VoteError::Unauthenticated)?;
        input.validate().map_err(|_| VoteError::ValidationError)?;
        let vote_type: VoteType = input
            .vote_type
            .parse()
            .map_err(|_| VoteError::ValidationError)?;
        let startup_id = input.startup_id.as_str();

        if !self.startup_repo.exists(startup_id).await? {
            return Err(VoteError::StartupNotFound);
        }

        let existing = self
            .vote_repo
            .find_by_user_and_startup(&session.user_id, startup_id)
            .await?;

        let change = match &existing {
            Some(current) if current.vote_type == vote_type => {
                tracing::debug!(
                    user_id = %session.user_id,
                    startup_id = %startup_id,
                    vote_type = %vote_type,
                    "Vote unchanged"
                );
                return Ok(SubmittedVote {
                    vote: current.clone(),
                    change: VoteChange::Unchanged,
                });
            }
            Some(current) => VoteChange::Changed {
                from: current.vote_type,
            },
            None => VoteChange::Created,
        };

        let now = Utc::now();
        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(session.user_id.clone()),
            startup_id: Set(startup_id.to_string()),
            vote_type: Set(vote_type),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let stored = self.vote_repo.upsert(model).await?;

        tracing::info!(
            user_id = %session.user_id,
            startup_id = %startup_id,
            vote_id = %stored.id,
            vote_type = %vote_type,
            change = ?change,
            "Vote submitted"
        );

        Ok(SubmittedVote {
            vote: stored,
            change,
        })
    }

    /// Retract the session user's vote on a startup.
    ///
    /// Fails with [`VoteError::StartupNotFound`] when there is no vote to
    /// remove; the store is left untouched in that case.
    pub async fn remove_vote(
        &self,
        session: Option<&Session>,
        input: RemoveVoteInput,
    ) -> Result<(), VoteError> {
        let session = session.ok_or(VoteError::Unauthenticated)?;
        input.validate().map_err(|_| VoteError::ValidationError)?;

        let existing = self
            .vote_repo
            .find_by_user_and_startup(&session.user_id, &input.startup_id)
            .await?
            .ok_or(VoteError::StartupNotFound)?;

        // A concurrent retraction may have won the race.
        if !self.vote_repo.delete(&existing.id).await? {
            return Err(VoteError::StartupNotFound);
        }

        tracing::info!(
            user_id = %session.user_id,
            startup_id = %input.startup_id,
            vote_id = %existing.id,
            "Vote removed"
        );
        Ok(())
    }

    /// Get the session user's own vote on a startup.
    ///
    /// Looking up another user's vote fails with
    /// [`VoteError::Unauthenticated`].
    pub async fn get_user_vote(
        &self,
        session: Option<&Session>,
        input: GetUserVoteInput,
    ) -> Result<Option<UserVote>, VoteError> {
        let session = session.ok_or(VoteError::Unauthenticated)?;
        input.validate().map_err(|_| VoteError::ValidationError)?;

        if input.user_id != session.user_id {
            tracing::warn!(
                session_user = %session.user_id,
                requested_user = %input.user_id,
                "Rejected cross-user vote lookup"
            );
            return Err(VoteError::Unauthenticated);
        }

        Ok(self
            .vote_repo
            .find_by_user_and_startup(&session.user_id, &input.startup_id)
            .await?
            .map(UserVote::from))
    }

    /// Aggregate vote counts for a startup.
    pub async fn vote_counts(&self, startup_id: &str) -> Result<VoteCounts, VoteError> {
        if startup_id.is_empty() {
            return Err(VoteError::ValidationError);
        }

        Ok(load_counts(&self.vote_repo, startup_id).await?)
    }
}

/// Count a startup's up and down votes. Up is queried first.
pub(crate) async fn load_counts(
    vote_repo: &VoteRepository,
    startup_id: &str,
) -> AppResult<VoteCounts> {
    let thumbs_up = vote_repo
        .count_by_startup_and_type(startup_id, VoteType::Up)
        .await?;
    let thumbs_down = vote_repo
        .count_by_startup_and_type(startup_id, VoteType::Down)
        .await?;

    Ok(VoteCounts::new(thumbs_up, thumbs_down))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pitchboard_db::entities::startup;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_startup(id: &str) -> startup::Model {
        startup::Model {
            id: id.to_string(),
            title: "Solar Kettles".to_string(),
            slug: "solar-kettles".to_string(),
            author_id: "founder".to_string(),
            description: "Kettles that boil water using only sunlight".to_string(),
            category: "Energy".to_string(),
            image: "https://img.example.com/kettle.png".to_string(),
            pitch: "Because tea.".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_vote(id: &str, user_id: &str, startup_id: &str, vote_type: VoteType) -> vote::Model {
        let now = Utc::now();
        vote::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            startup_id: startup_id.to_string(),
            vote_type,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn empty_db() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service(vote_db: Arc<DatabaseConnection>, startup_db: Arc<DatabaseConnection>) -> VoteService {
        VoteService::new(
            VoteRepository::new(vote_db),
            StartupRepository::new(startup_db),
        )
    }

    fn statement_count(db: Arc<DatabaseConnection>) -> usize {
        Arc::try_unwrap(db).unwrap().into_transaction_log().len()
    }

    fn session() -> Session {
        Session::new("user1", "Ada")
    }

    #[tokio::test]
    async fn test_unauthenticated_actions_touch_nothing() {
        let vote_db = empty_db();
        let startup_db = empty_db();
        let svc = service(Arc::clone(&vote_db), Arc::clone(&startup_db));

        let submit = svc
            .submit_vote(None, SubmitVoteInput::new("s1", VoteType::Up))
            .await;
        let remove = svc
            .remove_vote(None, RemoveVoteInput { startup_id: "s1".to_string() })
            .await;
        let get = svc
            .get_user_vote(
                None,
                GetUserVoteInput {
                    startup_id: "s1".to_string(),
                    user_id: "user1".to_string(),
                },
            )
            .await;

        assert_eq!(submit.unwrap_err(), VoteError::Unauthenticated);
        assert_eq!(remove.unwrap_err(), VoteError::Unauthenticated);
        assert_eq!(get.unwrap_err(), VoteError::Unauthenticated);

        drop(svc);
        assert_eq!(statement_count(vote_db), 0);
        assert_eq!(statement_count(startup_db), 0);
    }

    #[tokio::test]
    async fn test_submit_validation_errors() {
        let svc = service(empty_db(), empty_db());
        let session = session();

        let empty_id = svc
            .submit_vote(Some(&session), SubmitVoteInput::new("", VoteType::Up))
            .await;
        assert_eq!(empty_id.unwrap_err(), VoteError::ValidationError);

        let bad_type = svc
            .submit_vote(
                Some(&session),
                SubmitVoteInput {
                    startup_id: "s1".to_string(),
                    vote_type: "sideways".to_string(),
                },
            )
            .await;
        assert_eq!(bad_type.unwrap_err(), VoteError::ValidationError);
    }

    #[tokio::test]
    async fn test_submit_startup_not_found() {
        let startup_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<startup::Model>::new()])
                .into_connection(),
        );
        let svc = service(empty_db(), startup_db);

        let result = svc
            .submit_vote(Some(&session()), SubmitVoteInput::new("ghost", VoteType::Up))
            .await;
        assert_eq!(result.unwrap_err(), VoteError::StartupNotFound);
    }

    #[tokio::test]
    async fn test_submit_creates_vote() {
        let startup_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_startup("s1")]])
                .into_connection(),
        );
        let created = create_test_vote("v1", "user1", "s1", VoteType::Up);
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vote::Model>::new()])
                .append_query_results([[created.clone()]])
                .into_connection(),
        );
        let svc = service(vote_db, startup_db);

        let result = svc
            .submit_vote(Some(&session()), SubmitVoteInput::new("s1", VoteType::Up))
            .await
            .unwrap();

        assert_eq!(result.change, VoteChange::Created);
        assert_eq!(result.vote, created);
    }

    #[tokio::test]
    async fn test_submit_flips_existing_vote_in_place() {
        let startup_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_startup("s1")]])
                .into_connection(),
        );
        let existing = create_test_vote("v1", "user1", "s1", VoteType::Up);
        let flipped = create_test_vote("v1", "user1", "s1", VoteType::Down);
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_query_results([[flipped]])
                .into_connection(),
        );
        let svc = service(vote_db, startup_db);

        let result = svc
            .submit_vote(Some(&session()), SubmitVoteInput::new("s1", VoteType::Down))
            .await
            .unwrap();

        assert_eq!(
            result.change,
            VoteChange::Changed {
                from: VoteType::Up
            }
        );
        assert_eq!(result.vote.id, "v1");
        assert_eq!(result.vote.vote_type, VoteType::Down);
    }

    #[tokio::test]
    async fn test_submit_identical_vote_is_noop() {
        let startup_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_startup("s1")]])
                .into_connection(),
        );
        let existing = create_test_vote("v1", "user1", "s1", VoteType::Up);
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing.clone()]])
                .into_connection(),
        );
        let svc = service(Arc::clone(&vote_db), startup_db);

        let result = svc
            .submit_vote(Some(&session()), SubmitVoteInput::new("s1", VoteType::Up))
            .await
            .unwrap();

        assert_eq!(result.change, VoteChange::Unchanged);
        assert_eq!(result.vote, existing);

        // Only the lookup ran; no write.
        drop(svc);
        assert_eq!(statement_count(vote_db), 1);
    }

    #[tokio::test]
    async fn test_submit_store_failure_is_network_error() {
        let startup_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal(
                    "connection refused".to_string(),
                ))])
                .into_connection(),
        );
        let svc = service(empty_db(), startup_db);

        let result = svc
            .submit_vote(Some(&session()), SubmitVoteInput::new("s1", VoteType::Up))
            .await;
        assert_eq!(result.unwrap_err(), VoteError::NetworkError);
    }

    #[tokio::test]
    async fn test_remove_without_vote_is_not_found() {
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vote::Model>::new()])
                .into_connection(),
        );
        let svc = service(Arc::clone(&vote_db), empty_db());

        let result = svc
            .remove_vote(Some(&session()), RemoveVoteInput { startup_id: "s1".to_string() })
            .await;
        assert_eq!(result.unwrap_err(), VoteError::StartupNotFound);

        // Lookup only, no delete issued.
        drop(svc);
        assert_eq!(statement_count(vote_db), 1);
    }

    #[tokio::test]
    async fn test_remove_deletes_existing_vote() {
        let existing = create_test_vote("v1", "user1", "s1", VoteType::Up);
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(vote_db, empty_db());

        svc.remove_vote(Some(&session()), RemoveVoteInput { startup_id: "s1".to_string() })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_validation_error() {
        let svc = service(empty_db(), empty_db());
        let result = svc
            .remove_vote(Some(&session()), RemoveVoteInput { startup_id: String::new() })
            .await;
        assert_eq!(result.unwrap_err(), VoteError::ValidationError);
    }

    #[tokio::test]
    async fn test_get_user_vote_round_trip() {
        let stored = create_test_vote("v1", "user1", "s1", VoteType::Up);
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored]])
                .into_connection(),
        );
        let svc = service(vote_db, empty_db());

        let vote = svc
            .get_user_vote(
                Some(&session()),
                GetUserVoteInput {
                    startup_id: "s1".to_string(),
                    user_id: "user1".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(vote.id.as_deref(), Some("v1"));
        assert_eq!(vote.vote_type, Some(VoteType::Up));
    }

    #[tokio::test]
    async fn test_get_user_vote_rejects_other_user() {
        let vote_db = empty_db();
        let svc = service(Arc::clone(&vote_db), empty_db());

        let result = svc
            .get_user_vote(
                Some(&session()),
                GetUserVoteInput {
                    startup_id: "s1".to_string(),
                    user_id: "someone-else".to_string(),
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), VoteError::Unauthenticated);

        drop(svc);
        assert_eq!(statement_count(vote_db), 0);
    }

    #[tokio::test]
    async fn test_vote_counts() {
        let vote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );
        let svc = service(vote_db, empty_db());

        let counts = svc.vote_counts("s1").await.unwrap();
        assert_eq!(counts, VoteCounts::new(3, 1));
    }
}
