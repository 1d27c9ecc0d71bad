//! Query and path parameter parsing with caller-friendly error messages.
//!
//! Parameters arrive as raw strings so that a malformed value produces a
//! specific 400 message ("failed to parse limit") rather than a generic
//! deserialization failure.

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use songbook_core::{models::release_date, SongFilter};

use crate::error::ApiError;

/// Parse a required integer query parameter.
pub fn parse_required_int(name: &str, value: Option<&str>) -> Result<i64, ApiError> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("failed to parse {}", name)))
}

/// Parse a song id from a path segment or query value.
pub fn parse_song_id(value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::BadRequest(format!("invalid song id '{}'", value)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Window parameters shared by the listing and text endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Maximum number of items to return (required).
    #[param(value_type = i64)]
    pub limit: Option<String>,
    /// Number of items to skip (required).
    #[param(value_type = i64)]
    pub offset: Option<String>,
}

impl PageQuery {
    /// `(limit, offset)`, both required integers.
    pub fn window(&self) -> Result<(i64, i64), ApiError> {
        Ok((
            parse_required_int("limit", self.limit.as_deref())?,
            parse_required_int("offset", self.offset.as_deref())?,
        ))
    }
}

/// Song listing filter as received on the query string.
///
/// Empty values mean "no constraint".
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SongsQuery {
    /// Maximum number of songs to return (required).
    #[param(value_type = i64)]
    pub limit: Option<String>,
    /// Number of matching songs to skip (required).
    #[param(value_type = i64)]
    pub offset: Option<String>,
    /// Exact song id.
    #[serde(rename = "songID")]
    pub song_id: Option<String>,
    /// Substring of the group name.
    pub group: Option<String>,
    /// Substring of the song title.
    pub song: Option<String>,
    /// Exact release date, `DD.MM.YYYY` or `YYYY-MM-DD`.
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    /// Substring of the lyrics.
    pub text: Option<String>,
    /// Exact link.
    pub link: Option<String>,
}

impl SongsQuery {
    /// Convert into a [`SongFilter`].
    pub fn into_filter(self) -> Result<SongFilter, ApiError> {
        let limit = parse_required_int("limit", self.limit.as_deref())?;
        let offset = parse_required_int("offset", self.offset.as_deref())?;

        let song_id = non_empty(self.song_id)
            .map(|id| parse_song_id(&id))
            .transpose()?;
        let release_date = non_empty(self.release_date)
            .map(|d| release_date::parse(&d).map_err(ApiError::BadRequest))
            .transpose()?;

        Ok(SongFilter {
            song_id,
            group: non_empty(self.group),
            song: non_empty(self.song),
            release_date,
            text: non_empty(self.text),
            link: non_empty(self.link),
            limit,
            offset,
        })
    }
}
