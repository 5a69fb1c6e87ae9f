//! Main HTTP server and routing.

use std::any::Any;
use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument};

use oravision_responder::OraClient;
use oravision_understanding::VisionAdapter;

use crate::api;
use crate::error::ApiError;
use crate::index_page;

/// Request body cap. Inline photos arrive base64-encoded inside the JSON, so
/// this follows the 40 MB request limit of `images:annotate` rather than
/// axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 40 * 1024 * 1024;

/// Application state shared across routes. Immutable after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub vision: VisionAdapter,
    pub ora: OraClient,
}

impl GatewayState {
    pub fn new(vision: VisionAdapter, ora: OraClient) -> Self {
        Self { vision, ora }
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "Internal Server Error".to_string());
    error!(%message, "Handler panicked");
    ApiError::Internal(message).into_response()
}

/// All routes. Wrong methods on known paths fall through to 404 like unknown paths.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(index_page::index).fallback(api::not_found))
        .route(api::HEALTH, get(api::health).fallback(api::not_found))
        .route(api::ANALYZE_IMAGE, post(api::analyze_image).fallback(api::not_found))
        .route(api::QUERY_ORA, post(api::query_ora).fallback(api::not_found))
        .route(
            api::ANALYZE_AND_QUERY,
            post(api::analyze_and_query).fallback(api::not_found),
        )
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    info!(
        vision = state.vision.backend_name(),
        ora = state.ora.backend_name(),
        "Starting HTTP server"
    );
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
