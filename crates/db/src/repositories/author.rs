//! Author repository.

use std::sync::Arc;

use crate::entities::{Author, author};
use pitchboard_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Author repository for database operations.
#[derive(Clone)]
pub struct AuthorRepository {
    db: Arc<DatabaseConnection>,
}

impl AuthorRepository {
    /// Create a new author repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an author by bearer token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<author::Model>> {
        Author::find()
            .filter(author::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new author.
    pub async fn create(&self, model: author::ActiveModel) -> AppResult<author::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_author(id: &str, token: &str) -> author::Model {
        author::Model {
            id: id.to_string(),
            name: "Ada".to_string(),
            username: format!("ada_{id}"),
            email: None,
            image: None,
            bio: None,
            token: Some(token.to_string()),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let author = create_test_author("a1", "tok1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author.clone()]])
                .into_connection(),
        );

        let repo = AuthorRepository::new(db);
        let found = repo.find_by_token("tok1").await.unwrap();

        assert_eq!(found.unwrap().id, "a1");
    }

    #[tokio::test]
    async fn test_find_by_unknown_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<author::Model>::new()])
                .into_connection(),
        );

        let repo = AuthorRepository::new(db);
        assert!(repo.find_by_token("stale").await.unwrap().is_none());
    }
}
