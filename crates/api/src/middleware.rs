//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use pitchboard_core::{SessionService, StartupService, VoteService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub vote_service: VoteService,
    pub startup_service: StartupService,
    pub sessions: SessionService,
}

/// Authentication middleware.
///
/// Resolves `Authorization: Bearer <token>` into a [`pitchboard_core::Session`]
/// request extension. Unknown tokens and resolver failures leave the request
/// anonymous.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.sessions.resolve(token.trim()).await {
            Ok(Some(session)) => {
                req.extensions_mut().insert(session);
            }
            Ok(None) => tracing::debug!("Unknown bearer token"),
            Err(e) => tracing::warn!(error = %e, "Session resolution failed"),
        }
    }

    next.run(req).await
}
