//! HTTP host for the compiled dashboard.
//!
//! # Endpoints
//!
//! | Method | Path       | Description                                   |
//! |--------|------------|-----------------------------------------------|
//! | GET    | `/health`  | Health check                                  |
//! | GET    | `/env.js`  | Backend settings as `window.*` globals        |
//! | GET    | `/*`       | Files from the dist directory, else `index.html` |

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use leadpanel::SupabaseConfig;
use serde_json::{json, Value};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::services::{ServeDir, ServeFile};

use super::env::env_script;
use crate::error::{ServerError, ServerResult};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct HostState {
    pub config: SupabaseConfig,
}

/// Options for [`start_server`].
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: u16,
    pub dist: PathBuf,
}

/// Fail unless `dist` contains the built `index.html`.
pub fn validate_dist(dist: &Path) -> ServerResult<()> {
    if dist.join("index.html").is_file() {
        Ok(())
    } else {
        Err(ServerError::MissingDist(dist.to_path_buf()))
    }
}

/// Routes for the host. Unknown paths fall back to `index.html`.
pub fn build_router(state: HostState, dist: &Path) -> Router {
    let static_files = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .route("/env.js", get(env_js))
        .fallback_service(static_files)
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn start_server(options: ServeOptions, config: SupabaseConfig) -> ServerResult<()> {
    validate_dist(&options.dist)?;

    let app = build_router(HostState { config }, &options.dist);

    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!("🚀 Lead Panel running on http://localhost:{}", options.port);
    tracing::info!("   Serving {}", options.dist.display());
    tracing::info!("   GET /env.js  - runtime configuration");
    tracing::info!("   GET /health  - health check");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<Arc<HostState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "leadpanel",
        "version": env!("CARGO_PKG_VERSION"),
        "configured": state.config.is_complete(),
    }))
}

/// Runtime configuration script, never cached.
async fn env_js(State(state): State<Arc<HostState>>) -> Response {
    match env_script(&state.config) {
        Ok(script) => (
            [
                (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            script,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("❌ Cannot render env.js: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
