//! Startup repository.

use std::sync::Arc;

use crate::entities::{Startup, startup};
use pitchboard_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Startup repository for database operations.
#[derive(Clone)]
pub struct StartupRepository {
    db: Arc<DatabaseConnection>,
}

impl StartupRepository {
    /// Create a new startup repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a startup by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<startup::Model>> {
        Startup::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a startup by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<startup::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::StartupNotFound(id.to_string()))
    }

    /// Check whether a startup exists.
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Create a new startup.
    pub async fn create(&self, model: startup::ActiveModel) -> AppResult<startup::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get startups by an author, newest first.
    pub async fn find_by_author(
        &self,
        author_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<startup::Model>> {
        let mut query = Startup::find()
            .filter(startup::Column::AuthorId.eq(author_id))
            .order_by_desc(startup::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(startup::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
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

    fn create_test_startup(id: &str, author_id: &str) -> startup::Model {
        startup::Model {
            id: id.to_string(),
            title: "Solar Kettles".to_string(),
            slug: "solar-kettles".to_string(),
            author_id: author_id.to_string(),
            description: "Kettles that boil water using nothing but sunlight".to_string(),
            category: "Energy".to_string(),
            image: "https://img.example.com/kettle.png".to_string(),
            pitch: "# Why now\nBecause tea.".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_exists_true() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_startup("s1", "a1")]])
                .into_connection(),
        );

        let repo = StartupRepository::new(db);
        assert!(repo.exists("s1").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<startup::Model>::new()])
                .into_connection(),
        );

        let repo = StartupRepository::new(db);
        match repo.get_by_id("nope").await {
            Err(AppError::StartupNotFound(id)) => assert_eq!(id, "nope"),
            _ => panic!("Expected StartupNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_startup("s2", "a1"),
                    create_test_startup("s1", "a1"),
                ]])
                .into_connection(),
        );

        let repo = StartupRepository::new(db);
        let result = repo.find_by_author("a1", 10, None).await.unwrap();
        assert_eq!(result.len(), 2);
    }
}
