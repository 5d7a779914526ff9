use std::path::{Path, PathBuf};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};
use utoipa::OpenApi;

use common::types::Health;
use configs::AppConfig;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod datasets;

/// Router knobs taken from `AppConfig`.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub max_body_bytes: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl RouterConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            max_body_bytes: cfg.upload.max_body_bytes,
            static_dir: cfg.server.static_dir.as_ref().map(PathBuf::from),
        }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: dataset API, health, OpenAPI document and optional static assets.
pub fn build_router(state: AppState, cors: CorsLayer, cfg: &RouterConfig) -> Router {
    let api = Router::new()
        // browsers and scripts post with and without the trailing slash
        .route("/api/upload-csv/", post(datasets::upload_csv))
        .route("/api/upload-csv", post(datasets::upload_csv))
        .route("/api/files", get(datasets::list_files))
        .route("/api/data/:filename", get(datasets::get_data))
        .layer(DefaultBodyLimit::max(cfg.max_body_bytes));

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api);

    if let Some(dir) = cfg.static_dir.as_deref() {
        app = with_static_assets(app, dir);
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx, including unparseable uploads
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Serve `dir` for unmatched paths, falling back to its `index.html` for client-side routes.
fn with_static_assets(app: Router<AppState>, dir: &Path) -> Router<AppState> {
    if !dir.is_dir() {
        warn!(static_dir = %dir.display(), "static assets directory not found; not serving frontend");
        return app;
    }
    info!(static_dir = %dir.display(), "serving static assets");
    let index = dir.join("index.html");
    app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
}
