// Web server: Axum JSON API used by the claim client app.
//
// POST /upload runs bill extraction and fraud scoring, POST /chat drives the
// claim assistant. GET / doubles as the health check that the keep-alive
// pinger hits on the hosted deployment.
//
// The model client and profile directory are built once at startup and
// passed in; handlers only ever see them through AppState.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::extraction::profiles::ProfileDirectory;
use crate::gemini::ContentGenerator;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn ContentGenerator>,
    pub profiles: Arc<dyn ProfileDirectory>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    generator: Arc<dyn ContentGenerator>,
    profiles: Arc<dyn ProfileDirectory>,
) -> Result<()> {
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let state = AppState {
        config: Arc::new(config),
        generator,
        profiles,
    };

    let app = build_router(state);

    info!("ClaimSense API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/upload", post(handlers::upload::upload))
        .route("/chat", post(handlers::chat::chat))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured client origins. A `*` entry allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
