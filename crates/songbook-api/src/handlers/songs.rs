//! Song catalog HTTP handlers.
//!
//! Each handler parses its request, calls [`CatalogService`](crate::services::CatalogService)
//! with the request's [`RequestContext`](songbook_core::RequestContext), and
//! maps failures through [`ApiError`].

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use songbook_core::{NewSong, Song};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, Correlation};
use crate::query_types::{parse_song_id, PageQuery, SongsQuery};
use crate::AppState;

/// Response body of the listing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SongsResponse {
    pub songs: Vec<Song>,
}

/// Response body of the text endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SongTextResponse {
    /// Requested couplets, separated by a blank line.
    pub text: String,
}

/// Liveness check.
#[utoipa::path(get, path = "/ping", tag = "System",
    responses((status = 200, description = "Alive", body = String)))]
pub async fn ping() -> Json<&'static str> {
    Json("pong")
}

/// List songs matching the query filters.
///
/// GET /v1/get/songs
#[utoipa::path(get, path = "/v1/get/songs", tag = "Songs",
    params(SongsQuery),
    responses(
        (status = 200, description = "Matching songs", body = SongsResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")))]
pub async fn get_songs(
    State(state): State<AppState>,
    Correlation(ctx): Correlation,
    ApiQuery(query): ApiQuery<SongsQuery>,
) -> Result<Json<SongsResponse>, ApiError> {
    let filter = query.into_filter()?;
    let songs = state.catalog.get_songs(&ctx, filter).await?;
    debug!(
        request_id = %ctx.request_id,
        subsystem = "api",
        op = "get_songs",
        result_count = songs.len(),
        "Listed songs"
    );
    Ok(Json(SongsResponse { songs }))
}

/// Get a window of couplets from one song.
///
/// GET /v1/get/songs/:id
#[utoipa::path(get, path = "/v1/get/songs/{id}", tag = "Songs",
    params(("id" = String, Path, description = "Song ID"), PageQuery),
    responses(
        (status = 200, description = "Requested couplets", body = SongTextResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Song not found"),
        (status = 500, description = "Internal error")))]
pub async fn get_song_text(
    State(state): State<AppState>,
    Correlation(ctx): Correlation,
    ApiPath(id): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<Json<SongTextResponse>, ApiError> {
    let (limit, offset) = page.window()?;
    let song_id = parse_song_id(&id)?;
    let text = state
        .catalog
        .get_song_text(&ctx, song_id, limit, offset)
        .await?;
    Ok(Json(SongTextResponse { text }))
}

/// Delete a song.
///
/// DELETE /v1/del/:id
#[utoipa::path(delete, path = "/v1/del/{id}", tag = "Songs",
    params(("id" = String, Path, description = "Song ID")),
    responses(
        (status = 200, description = "Deleted (or already absent)"),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")))]
pub async fn delete_song(
    State(state): State<AppState>,
    Correlation(ctx): Correlation,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<()>, ApiError> {
    let song_id = parse_song_id(&id)?;
    state.catalog.delete_song(&ctx, song_id).await?;
    Ok(Json(()))
}

/// Replace every mutable field of a song.
///
/// PUT /v1/edit/
#[utoipa::path(put, path = "/v1/edit/", tag = "Songs",
    request_body = Song,
    responses(
        (status = 200, description = "Edited (or unknown id)"),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")))]
pub async fn edit_song(
    State(state): State<AppState>,
    Correlation(ctx): Correlation,
    ApiJson(song): ApiJson<Song>,
) -> Result<Json<()>, ApiError> {
    state.catalog.edit_song(&ctx, &song).await?;
    Ok(Json(()))
}

/// Add a song; release date, lyrics and link come from the song-data API.
///
/// POST /v1/new/song
#[utoipa::path(post, path = "/v1/new/song", tag = "Songs",
    request_body = NewSong,
    responses(
        (status = 201, description = "Created", body = Song),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")))]
pub async fn create_song(
    State(state): State<AppState>,
    Correlation(ctx): Correlation,
    ApiJson(new_song): ApiJson<NewSong>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let song = state.catalog.create_song(&ctx, new_song).await?;
    Ok((StatusCode::CREATED, Json(song)))
}
