//! HTTP API server for readoku.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod auth;
mod handlers;
mod query_types;
mod response_types;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use readoku_core::LedgerConfig;
use readoku_llm::StoryGenerator;
use readoku_service::{QuotaService, ReadingService, StatsService, StoryService};
use readoku_storage::StorageBackend;

pub use auth::{AuthUser, USER_ID_HEADER};
pub use response_types::VersionResponse;

/// Default frontend origin for local development.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Backing store, kept for the `/db-health` probe
    pub storage: Arc<StorageBackend>,
    pub config: LedgerConfig,
    /// Origin allowed by CORS in addition to the local dev servers
    pub frontend_url: String,
    pub quota_service: Arc<QuotaService>,
    pub reading_service: Arc<ReadingService>,
    pub stats_service: Arc<StatsService>,
    pub story_service: Arc<StoryService>,
}

impl AppState {
    /// Wire every service onto one storage backend and generator.
    pub fn new(
        storage: Arc<StorageBackend>,
        generator: Arc<dyn StoryGenerator>,
        config: LedgerConfig,
        frontend_url: String,
    ) -> Self {
        let quota_service = Arc::new(QuotaService::new(Arc::clone(&storage), config.clock));
        let reading_service = Arc::new(ReadingService::new(Arc::clone(&storage)));
        let stats_service =
            Arc::new(StatsService::new(Arc::clone(&storage), config.clock, config.stats_days));
        let story_service = Arc::new(StoryService::new(
            Arc::clone(&storage),
            generator,
            Arc::clone(&quota_service),
            config,
        ));
        Self {
            storage,
            config,
            frontend_url,
            quota_service,
            reading_service,
            stats_service,
            story_service,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.frontend_url);
    let api = Router::new()
        .route("/users/me/stats", get(handlers::stats::get_user_stats))
        .route("/users/me/generation-status", get(handlers::stats::get_generation_status))
        .route(
            "/stories",
            post(handlers::stories::generate_story).get(handlers::stories::list_stories),
        )
        .route("/stories/{id}", get(handlers::stories::get_story))
        .route("/stories/{id}/read", post(handlers::reading::mark_read))
        .route("/stories/{id}/read/latest", delete(handlers::reading::undo_last_read));

    Router::new()
        .route("/health", get(health))
        .route("/db-health", get(db_health))
        .route("/api/version", get(version))
        .nest("/api/v1", api)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = [frontend_url, DEFAULT_FRONTEND_URL, "http://127.0.0.1:5173"]
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim_end_matches('/')) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_credentials(true)
}

async fn health() -> &'static str {
    "ok"
}

async fn db_health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.storage.ping().await {
        Ok(()) => (StatusCode::OK, "database connection healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "db-health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database connection unhealthy")
        },
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
