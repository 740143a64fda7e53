//! Startup (pitch) service.

use async_trait::async_trait;
use chrono::Utc;
use pitchboard_common::{AppError, AppResult, IdGenerator};
use pitchboard_db::{
    entities::startup,
    repositories::{StartupRepository, VoteRepository},
};
use reqwest::{Client, header::CONTENT_TYPE};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::services::session::Session;
use crate::services::vote::load_counts;
use crate::voting::{UserVote, VotingProps};

/// Maximum number of startups returned per author listing.
const MAX_LIST_LIMIT: u64 = 100;

/// Input for creating a pitch.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePitchInput {
    #[validate(length(min = 3, max = 100))]
    pub title: String,
    #[validate(length(min = 20, max = 500))]
    pub description: String,
    #[validate(length(min = 3, max = 20))]
    pub category: String,
    /// Image URL shown with the pitch.
    #[validate(url)]
    pub link: String,
    /// Markdown body.
    #[validate(length(min = 10))]
    pub pitch: String,
}

/// A startup together with the props its voting section starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupPage {
    pub startup: startup::Model,
    pub voting: VotingProps,
}

/// Checks that a link points at an image.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Whether `url` serves an `image/*` content type.
    async fn is_image(&self, url: &str) -> bool;
}

/// Probes links with an HTTP `HEAD` request.
#[derive(Clone)]
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn is_image(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.starts_with("image/")),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Image probe failed");
                false
            }
        }
    }
}

/// Accepts every link.
pub struct NoOpImageProbe;

#[async_trait]
impl ImageProbe for NoOpImageProbe {
    async fn is_image(&self, _url: &str) -> bool {
        true
    }
}

/// Type alias for a shared image probe.
pub type ImageProbeService = Arc<dyn ImageProbe>;

/// Turn a title into a URL slug: lowercase ASCII letters, digits and single dashes.
///
/// Non-ASCII text is transliterated first, so `Crème` becomes `creme`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let ascii = deunicode::deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Service for publishing and reading startups.
#[derive(Clone)]
pub struct StartupService {
    startup_repo: StartupRepository,
    vote_repo: VoteRepository,
    image_probe: ImageProbeService,
    id_gen: IdGenerator,
}

impl StartupService {
    /// Create a new startup service.
    #[must_use]
    pub const fn new(
        startup_repo: StartupRepository,
        vote_repo: VoteRepository,
        image_probe: ImageProbeService,
    ) -> Self {
        Self {
            startup_repo,
            vote_repo,
            image_probe,
            id_gen: IdGenerator::new(),
        }
    }

    /// Publish a pitch authored by the session user.
    pub async fn create_pitch(
        &self,
        session: Option<&Session>,
        input: CreatePitchInput,
    ) -> AppResult<startup::Model> {
        let session = session.ok_or(AppError::Unauthorized)?;
        input.validate()?;

        if !self.image_probe.is_image(&input.link).await {
            return Err(AppError::Validation(
                "link: URL must point to an image".to_string(),
            ));
        }

        let slug = slugify(&input.title);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "title: must contain letters or digits".to_string(),
            ));
        }

        let model = startup::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            slug: Set(slug),
            author_id: Set(session.user_id.clone()),
            description: Set(input.description),
            category: Set(input.category),
            image: Set(input.link),
            pitch: Set(input.pitch),
            created_at: Set(Utc::now().into()),
        };
        let created = self.startup_repo.create(model).await?;

        tracing::info!(
            startup_id = %created.id,
            author_id = %session.user_id,
            slug = %created.slug,
            "Pitch created"
        );
        Ok(created)
    }

    /// Get a startup by ID.
    pub async fn get(&self, startup_id: &str) -> AppResult<startup::Model> {
        self.startup_repo.get_by_id(startup_id).await
    }

    /// Get a startup with the initial state of its voting section.
    pub async fn get_page(
        &self,
        session: Option<&Session>,
        startup_id: &str,
    ) -> AppResult<StartupPage> {
        let startup = self.get(startup_id).await?;

        let initial_votes = load_counts(&self.vote_repo, startup_id).await?;

        let initial_user_vote = match session {
            Some(s) => self
                .vote_repo
                .find_by_user_and_startup(&s.user_id, startup_id)
                .await?
                .map(UserVote::from),
            None => None,
        };

        Ok(StartupPage {
            voting: VotingProps {
                startup_id: startup.id.clone(),
                user_id: session.map(|s| s.user_id.clone()),
                initial_votes,
                initial_user_vote,
            },
            startup,
        })
    }

    /// List an author's startups, newest first.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<startup::Model>> {
        self.startup_repo
            .find_by_author(author_id, limit.min(MAX_LIST_LIMIT), until_id)
            .await
    }
}
