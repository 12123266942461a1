//! # API REST
//!
//! REST API for the wedding invitation backend.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `invite-core` for the comment pipeline.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::pb;
use invite_core::{AppConfig, CommentService};

pub use error::ApiError;

/// Application state shared by every request handler.
///
/// The store handle inside `comments` is created once at startup and reused.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub comments: CommentService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, comments: CommentService) -> Self {
        Self { config, comments }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::hello,
        handlers::diagnostics,
        handlers::list_comments,
        handlers::create_comment,
    ),
    components(schemas(
        pb::MessageRes,
        pb::CommentReq,
        pb::CommentRes,
        pb::ErrorRes,
        pb::DiagnosticsRes,
    ))
)]
pub struct ApiDoc;

/// Build the full REST router, including Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::diagnostics))
        .route(
            "/api/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
