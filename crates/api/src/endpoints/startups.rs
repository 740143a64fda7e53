//! Startup endpoints.

use axum::{Json, Router, extract::State, routing::post};
use pitchboard_common::AppResult;
use pitchboard_core::{CreatePitchInput, StartupPage};
use pitchboard_db::entities::startup;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Startup response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupResponse {
    pub id: String,
    pub created_at: String,
    pub title: String,
    pub slug: String,
    pub author_id: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub pitch: String,
}

impl From<startup::Model> for StartupResponse {
    fn from(s: startup::Model) -> Self {
        Self {
            id: s.id,
            created_at: s.created_at.to_rfc3339(),
            title: s.title,
            slug: s.slug,
            author_id: s.author_id,
            description: s.description,
            category: s.category,
            image: s.image,
            pitch: s.pitch,
        }
    }
}

/// Publish a pitch.
async fn create(
    AuthUser(session): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePitchInput>,
) -> AppResult<ApiResponse<StartupResponse>> {
    let startup = state
        .startup_service
        .create_pitch(Some(&session), input)
        .await?;
    Ok(ApiResponse::ok(startup.into()))
}

/// Show startup request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowStartupRequest {
    pub startup_id: String,
}

/// Startup page with its voting props.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupPageResponse {
    pub startup: StartupResponse,
    pub voting: pitchboard_core::voting::VotingProps,
}

impl From<StartupPage> for StartupPageResponse {
    fn from(page: StartupPage) -> Self {
        Self {
            startup: page.startup.into(),
            voting: page.voting,
        }
    }
}

/// Show a startup.
async fn show(
    MaybeAuthUser(session): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowStartupRequest>,
) -> AppResult<ApiResponse<StartupPageResponse>> {
    let page = state
        .startup_service
        .get_page(session.as_ref(), &req.startup_id)
        .await?;
    Ok(ApiResponse::ok(page.into()))
}

/// List startups by author request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByAuthorRequest {
    pub author_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

/// List an author's startups.
async fn by_author(
    State(state): State<AppState>,
    Json(req): Json<ByAuthorRequest>,
) -> AppResult<ApiResponse<Vec<StartupResponse>>> {
    let startups = state
        .startup_service
        .list_by_author(&req.author_id, req.limit, req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(startups.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/by-author", post(by_author))
}
