//! Vote repository.

use std::sync::Arc;

use crate::entities::{
    Vote,
    vote::{self, VoteType},
};
use pitchboard_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::OnConflict,
};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the vote a user cast on a startup.
    pub async fn find_by_user_and_startup(
        &self,
        user_id: &str,
        startup_id: &str,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::StartupId.eq(startup_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a vote, or flip the type of the existing `(user_id, startup_id)` vote.
    ///
    /// A single `INSERT ... ON CONFLICT (user_id, startup_id) DO UPDATE` statement.
    /// On conflict the stored row keeps its original `id` and `created_at`.
    pub async fn upsert(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        Vote::insert(model)
            .on_conflict(
                OnConflict::columns([vote::Column::UserId, vote::Column::StartupId])
                    .update_columns([vote::Column::VoteType, vote::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a vote by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Vote::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Count votes of one type on a startup.
    pub async fn count_by_startup_and_type(
        &self,
        startup_id: &str,
        vote_type: VoteType,
    ) -> AppResult<u64> {
        Vote::find()
            .filter(vote::Column::StartupId.eq(startup_id))
            .filter(vote::Column::VoteType.eq(vote_type))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

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

    #[tokio::test]
    async fn test_find_by_user_and_startup() {
        let vote = create_test_vote("v1", "user1", "s1", VoteType::Up);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vote.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.find_by_user_and_startup("user1", "s1").await.unwrap();

        assert_eq!(result.unwrap().vote_type, VoteType::Up);
    }

    #[tokio::test]
    async fn test_find_by_user_and_startup_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vote::Model>::new()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.find_by_user_and_startup("user1", "s1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_upsert_issues_on_conflict_statement() {
        let stored = create_test_vote("v1", "user1", "s1", VoteType::Down);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(Arc::clone(&db));
        let now = Utc::now();
        let model = vote::ActiveModel {
            id: Set("v2".to_string()),
            user_id: Set("user1".to_string()),
            startup_id: Set("s1".to_string()),
            vote_type: Set(VoteType::Down),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = repo.upsert(model).await.unwrap();
        // The conflicting row keeps its id.
        assert_eq!(result.id, "v1");
        assert_eq!(result.vote_type, VoteType::Down);

        drop(repo);
        let db = Arc::try_unwrap(db).unwrap();
        let sql = format!("{:?}", db.into_transaction_log());
        assert!(sql.contains("ON CONFLICT"));
        assert!(sql.contains("startup_id"));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        assert!(repo.delete("v1").await.unwrap());
        assert!(!repo.delete("v1").await.unwrap());
    }

    #[tokio::test]
    async fn test_count_by_startup_and_type() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let count = repo
            .count_by_startup_and_type("s1", VoteType::Up)
            .await
            .unwrap();
        assert_eq!(count, 3);
    }
}
