//! # songbook-api
//!
//! HTTP transport for the songbook catalog: routing, request parsing, error
//! mapping, and process configuration. The binary in `main.rs` wires these
//! to PostgreSQL and the song-data API.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query_types;
pub mod services;
pub mod telemetry;

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::error;
use utoipa::OpenApi;
use uuid::Uuid;

use songbook_core::error::INTERNAL_MESSAGE;

pub use error::ApiError;
pub use services::CatalogService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

const X_REQUEST_ID: &str = "x-request-id";

/// Strip an inbound `x-request-id` that is not a UUID so the request-id
/// layer assigns a fresh one. [`extract::Correlation`] then always sees the
/// id the trace span logs.
async fn drop_invalid_request_id(mut request: Request<Body>) -> Request<Body> {
    let invalid = request
        .headers()
        .get(X_REQUEST_ID)
        .is_some_and(|v| v.to_str().ok().and_then(|s| Uuid::parse_str(s).ok()).is_none());
    if invalid {
        request.headers_mut().remove(X_REQUEST_ID);
    }
    request
}

// =============================================================================
// OPENAPI
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Songbook API",
        version = "0.1.0",
        description = "Song catalog with lyrics pagination and automatic metadata enrichment"
    ),
    paths(
        handlers::songs::ping,
        handlers::songs::get_songs,
        handlers::songs::get_song_text,
        handlers::songs::delete_song,
        handlers::songs::edit_song,
        handlers::songs::create_song,
    ),
    components(schemas(
        songbook_core::Song,
        songbook_core::SongData,
        songbook_core::NewSong,
        handlers::songs::SongsResponse,
        handlers::songs::SongTextResponse,
    )),
    tags(
        (name = "Songs", description = "Song catalog operations"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(subsystem = "api", panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        Json(serde_json::json!({ "error": INTERNAL_MESSAGE })),
    )
        .into_response()
}

/// Build the application router with all middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::songs::ping))
        .route("/v1/get/songs", get(handlers::songs::get_songs))
        .route("/v1/get/songs/:id", get(handlers::songs::get_song_text))
        .route("/v1/del/:id", delete(handlers::songs::delete_song))
        .route("/v1/edit/", put(handlers::songs::edit_song))
        .route("/v1/edit", put(handlers::songs::edit_song))
        .route("/v1/new/song", post(handlers::songs::create_song))
        .route("/v1/openapi.json", get(openapi_json))
        // Middleware
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(middleware::map_request(drop_invalid_request_id))
        .with_state(state)
}
