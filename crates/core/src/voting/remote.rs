//! Vote actions executed against a remote pitchboard server.

use async_trait::async_trait;
use pitchboard_common::{AppError, AppResult, VoteError};
use pitchboard_db::entities::vote::VoteType;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

use crate::voting::{UserVote, VoteActions};

/// Body returned by every vote endpoint, whatever the status code.
#[derive(Debug, Deserialize)]
struct ActionBody<T> {
    success: bool,
    error: Option<String>,
    data: Option<T>,
}

/// HTTP client for the `/api/votes` endpoints.
#[derive(Clone)]
pub struct HttpVoteActions {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpVoteActions {
    /// Create a client for `base_url`, authenticating with `token` if given.
    ///
    /// `base_url` may carry a path prefix; endpoints are resolved below it.
    pub fn new(base_url: &str, token: Option<String>) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid base URL: {e}")))?;
        // join() replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        body: Value,
    ) -> Result<Option<T>, VoteError> {
        let url = self
            .base_url
            .join(&format!("api/votes/{action}"))
            .map_err(|_| VoteError::UnknownError)?;

        let mut request = self.client.post(url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(action = %action, error = %e, "Vote request failed");
            VoteError::NetworkError
        })?;
        let status = response.status();

        let body: ActionBody<T> = response.json().await.map_err(|e| {
            tracing::warn!(action = %action, status = %status, error = %e, "Malformed vote response");
            VoteError::UnknownError
        })?;

        if body.success {
            Ok(body.data)
        } else {
            Err(body
                .error
                .as_deref()
                .map_or(VoteError::UnknownError, VoteError::from_code))
        }
    }
}

#[async_trait]
impl VoteActions for HttpVoteActions {
    async fn submit_vote(&self, startup_id: &str, vote_type: VoteType) -> Result<(), VoteError> {
        self.call::<Value>("submit", json!({ "startupId": startup_id, "voteType": vote_type }))
            .await
            .map(|_| ())
    }

    async fn remove_vote(&self, startup_id: &str) -> Result<(), VoteError> {
        self.call::<Value>("remove", json!({ "startupId": startup_id }))
            .await
            .map(|_| ())
    }

    async fn get_user_vote(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<Option<UserVote>, VoteError> {
        self.call(
            "user-vote",
            json!({ "startupId": startup_id, "userId": user_id }),
        )
        .await
    }
}
