//! Session resolution.
//!
//! The auth provider is an external collaborator; the service only needs to
//! turn a request credential into the signed-in author's identity. The
//! resolved [`Session`] is passed explicitly into every action.

use async_trait::async_trait;
use pitchboard_common::AppResult;
use pitchboard_db::{entities::author, repositories::AuthorRepository};
use std::sync::Arc;

/// Identity of the signed-in author for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Author ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
}

impl Session {
    /// Create a session for an author ID.
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

impl From<author::Model> for Session {
    fn from(author: author::Model) -> Self {
        Self {
            user_id: author.id,
            name: author.name,
        }
    }
}

/// Resolves a request credential to a session.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve a bearer token. `Ok(None)` means the token is unknown.
    async fn resolve(&self, token: &str) -> AppResult<Option<Session>>;
}

/// Resolves bearer tokens against the author table.
#[derive(Clone)]
pub struct TokenSessionResolver {
    author_repo: AuthorRepository,
}

impl TokenSessionResolver {
    /// Create a new resolver.
    #[must_use]
    pub const fn new(author_repo: AuthorRepository) -> Self {
        Self { author_repo }
    }
}

#[async_trait]
impl SessionResolver for TokenSessionResolver {
    async fn resolve(&self, token: &str) -> AppResult<Option<Session>> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .author_repo
            .find_by_token(token)
            .await?
            .map(Session::from))
    }
}

/// Type alias for a shared session resolver.
pub type SessionService = Arc<dyn SessionResolver>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_author(id: &str) -> author::Model {
        author::Model {
            id: id.to_string(),
            name: "Grace".to_string(),
            username: "grace".to_string(),
            email: Some("grace@example.com".to_string()),
            image: None,
            bio: None,
            token: Some("secret".to_string()),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_resolve_known_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_author("a1")]])
                .into_connection(),
        );
        let resolver = TokenSessionResolver::new(AuthorRepository::new(db));

        let session = resolver.resolve("secret").await.unwrap().unwrap();
        assert_eq!(session, Session::new("a1", "Grace"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<author::Model>::new()])
                .into_connection(),
        );
        let resolver = TokenSessionResolver::new(AuthorRepository::new(db));

        assert!(resolver.resolve("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_empty_token_skips_store() {
        // No query results queued: touching the store would error.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let resolver = TokenSessionResolver::new(AuthorRepository::new(db));

        assert!(resolver.resolve("").await.unwrap().is_none());
    }
}
