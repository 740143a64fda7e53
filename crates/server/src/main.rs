//! Pitchboard server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware, routing::get};
use pitchboard_api::{middleware::AppState, router as api_router};
use pitchboard_common::Config;
use pitchboard_core::{
    HttpImageProbe, ImageProbeService, NoOpImageProbe, SessionService, StartupService,
    TokenSessionResolver, VoteService,
};
use pitchboard_db::repositories::{AuthorRepository, StartupRepository, VoteRepository};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest accepted request body. Pitches are markdown text only.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting pitchboard server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(pitchboard_db::init(&config).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    pitchboard_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let author_repo = AuthorRepository::new(Arc::clone(&db));
    let startup_repo = StartupRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));

    // Initialize services
    let image_probe: ImageProbeService = if config.pitch.verify_image_links {
        Arc::new(HttpImageProbe::new(Duration::from_secs(
            config.pitch.image_probe_timeout_secs,
        ))?)
    } else {
        info!("Image link verification disabled");
        Arc::new(NoOpImageProbe)
    };
    let sessions: SessionService = Arc::new(TokenSessionResolver::new(author_repo));

    let state = AppState {
        vote_service: VoteService::new(vote_repo.clone(), startup_repo.clone()),
        startup_service: StartupService::new(startup_repo, vote_repo, image_probe),
        sessions,
    };

    // Build router
    let app = Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            pitchboard_api::middleware::auth_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(url = %config.server.url, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
