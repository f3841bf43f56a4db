//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(api::health, api::upload, api::ask),
    info(title = "pagecite", description = "PDF question answering with page citations")
)]
struct ApiDoc;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = match state.config.server.cors_origin.as_str() {
        "*" => CorsLayer::permissive(),
        origin => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new().allow_origin(value),
            Err(_) => CorsLayer::permissive(),
        },
    };

    Router::new()
        .route("/health", get(api::health))
        .route("/documents/upload", post(api::upload))
        .route("/ask", post(api::ask))
        // PDFs can be large; default 2 MB is far too small.
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
