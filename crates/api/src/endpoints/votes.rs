//! Vote action endpoints.
//!
//! Every response body is `{success, error?, data?}`, including malformed
//! requests. A request without a session fails with `UNAUTHENTICATED` before
//! its body is looked at.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use pitchboard_common::VoteError;
use pitchboard_core::{
    GetUserVoteInput, RemoveVoteInput, Session, SubmitVoteInput,
    voting::{UserVote, VoteCounts},
};
use serde::Deserialize;

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ActionResponse};

/// Unwrap a JSON body, ranking a missing session above a bad body.
fn body<T>(
    session: Option<&Session>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, VoteError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(_) if session.is_none() => Err(VoteError::Unauthenticated),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected vote request body");
            Err(VoteError::ValidationError)
        }
    }
}

/// Cast or change a vote.
async fn submit(
    MaybeAuthUser(session): MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SubmitVoteInput>, JsonRejection>,
) -> ActionResponse<()> {
    let result = match body(session.as_ref(), payload) {
        Ok(input) => state
            .vote_service
            .submit_vote(session.as_ref(), input)
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };
    result.map_or_else(ActionResponse::failed, |()| ActionResponse::done())
}

/// Retract a vote.
async fn remove(
    MaybeAuthUser(session): MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<RemoveVoteInput>, JsonRejection>,
) -> ActionResponse<()> {
    let result = match body(session.as_ref(), payload) {
        Ok(input) => state.vote_service.remove_vote(session.as_ref(), input).await,
        Err(e) => Err(e),
    };
    result.map_or_else(ActionResponse::failed, |()| ActionResponse::done())
}

/// Fetch the caller's own vote. `data` is `null` when there is none.
async fn user_vote(
    MaybeAuthUser(session): MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<GetUserVoteInput>, JsonRejection>,
) -> ActionResponse<Option<UserVote>> {
    let result = match body(session.as_ref(), payload) {
        Ok(input) => state.vote_service.get_user_vote(session.as_ref(), input).await,
        Err(e) => Err(e),
    };
    ActionResponse::from_result(result)
}

/// Counts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsRequest {
    pub startup_id: String,
}

/// Aggregate counts. Public.
async fn counts(
    State(state): State<AppState>,
    payload: Result<Json<CountsRequest>, JsonRejection>,
) -> ActionResponse<VoteCounts> {
    let result = match payload {
        Ok(Json(req)) => state.vote_service.vote_counts(&req.startup_id).await,
        Err(_) => Err(VoteError::ValidationError),
    };
    ActionResponse::from_result(result)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/remove", post(remove))
        .route("/user-vote", post(user_vote))
        .route("/counts", post(counts))
}
