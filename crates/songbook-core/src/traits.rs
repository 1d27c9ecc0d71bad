//! Core traits for songbook abstractions.
//!
//! These traits define the seams between the catalog service and its
//! collaborators, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::Result;
use crate::models::{Song, SongData, SongFilter};

// =============================================================================
// CATALOG STORE
// =============================================================================

/// Durable storage and filtered retrieval of songs.
///
/// A song spans two physical rows (intrinsic data and group association);
/// every write touches both inside one transaction.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Insert the song and its group association atomically.
    async fn create_song(&self, ctx: &RequestContext, song: &Song) -> Result<()>;

    /// Replace all mutable fields of `song.song_id`. Unknown ids are a no-op.
    async fn edit_song(&self, ctx: &RequestContext, song: &Song) -> Result<()>;

    /// Remove the song and its group association. Unknown ids are a no-op.
    async fn delete_song(&self, ctx: &RequestContext, song_id: Uuid) -> Result<()>;

    /// Raw lyrics of one song. `NotFound` if the id is unknown.
    async fn get_song_text(&self, ctx: &RequestContext, song_id: Uuid) -> Result<String>;

    /// Songs matching every set predicate, ordered by id, windowed by
    /// `limit`/`offset`.
    async fn get_songs(&self, ctx: &RequestContext, filter: &SongFilter) -> Result<Vec<Song>>;
}

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Lookup of authoritative song metadata.
#[async_trait]
pub trait SongDataClient: Send + Sync {
    /// Fetch release date, lyrics and link for `(group, song)`.
    ///
    /// May return an empty [`SongData`] without error when the source is
    /// unavailable; callers must check [`SongData::is_empty`].
    async fn get_song_data(&self, ctx: &RequestContext, group: &str, song: &str)
        -> Result<SongData>;
}
