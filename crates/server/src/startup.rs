use std::{future::Future, net::SocketAddr, path::Path};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, RouterConfig};
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); when the file does not exist fall back
/// to defaults plus `SERVER_HOST` / `SERVER_PORT` / `STATIC_DIR`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = configs::config_path();
    if Path::new(&path).exists() {
        return AppConfig::load_and_validate();
    }
    warn!(%path, "config file not found; using environment and defaults");
    let mut cfg = AppConfig::from_env();
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Build the application router over a fresh in-memory store.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::in_memory();
    routes::build_router(state, build_cors(), &RouterConfig::from_app_config(cfg))
}

/// Build the app and serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg);
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        max_body_bytes = cfg.upload.max_body_bytes,
        "starting tabular upload server"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(%addr, "server stopped");
    Ok(())
}
