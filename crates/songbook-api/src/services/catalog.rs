//! Catalog service: creation orchestration and couplet pagination.
//!
//! Stateless; all shared state lives behind the injected store and client.
//!
//! ## Error Handling
//!
//! Errors from the store and the enrichment client are wrapped with context
//! and keep their [`ErrorKind`](songbook_core::ErrorKind). Nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use uuid::Uuid;

use songbook_core::{
    defaults, paginate_couplets, Error, NewSong, RequestContext, Result, ResultExt, Song,
    SongDataClient, SongFilter, SongRepository,
};

/// Catalog operations over a song store and an enrichment client.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn SongRepository>,
    song_data: Arc<dyn SongDataClient>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn SongRepository>, song_data: Arc<dyn SongDataClient>) -> Self {
        Self { repo, song_data }
    }

    /// Enrich and store a new song.
    ///
    /// Makes exactly one enrichment call. A soft-failed lookup stores the song
    /// with empty data; a rejected lookup stores nothing.
    pub async fn create_song(&self, ctx: &RequestContext, new_song: NewSong) -> Result<Song> {
        let start = Instant::now();
        let group = new_song.group.trim();
        let title = new_song.song.trim();

        if group.is_empty() || title.is_empty() {
            return Err(Error::InvalidInput(
                "group and song are required".to_string(),
            ));
        }
        if group.chars().count() > defaults::GROUP_NAME_MAX_LEN {
            return Err(Error::InvalidInput(format!(
                "group must be at most {} characters",
                defaults::GROUP_NAME_MAX_LEN
            )));
        }

        let data = self
            .song_data
            .get_song_data(ctx, group, title)
            .await
            .context("failed to get song data")?;

        let song = Song {
            song_id: Uuid::now_v7(),
            group: group.to_string(),
            song: title.to_string(),
            data,
        };

        self.repo
            .create_song(ctx, &song)
            .await
            .context("failed to create song")?;

        info!(
            request_id = %ctx.request_id,
            subsystem = "service",
            component = "catalog",
            op = "create_song",
            song_id = %song.song_id,
            enriched = !song.data.is_empty(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Song added to catalog"
        );
        Ok(song)
    }

    /// Replace every mutable field of an existing song.
    pub async fn edit_song(&self, ctx: &RequestContext, song: &Song) -> Result<()> {
        self.repo
            .edit_song(ctx, song)
            .await
            .context("failed to edit song")
    }

    /// Remove a song. Unknown ids succeed without change.
    pub async fn delete_song(&self, ctx: &RequestContext, song_id: Uuid) -> Result<()> {
        self.repo
            .delete_song(ctx, song_id)
            .await
            .context("failed to delete song")
    }

    /// Couplets `[offset, offset + limit)` of a song's lyrics.
    pub async fn get_song_text(
        &self,
        ctx: &RequestContext,
        song_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<String> {
        let limit = usize::try_from(limit)
            .map_err(|_| Error::InvalidInput("limit must be >= 0".to_string()))?;
        let offset = usize::try_from(offset)
            .map_err(|_| Error::InvalidInput("offset must be >= 0".to_string()))?;

        let text = self
            .repo
            .get_song_text(ctx, song_id)
            .await
            .context("failed to get song text")?;

        let page = paginate_couplets(&text, limit, offset)?;

        debug!(
            request_id = %ctx.request_id,
            subsystem = "service",
            component = "catalog",
            op = "get_song_text",
            song_id = %song_id,
            limit,
            offset,
            "Song text paginated"
        );
        Ok(page)
    }

    /// Songs matching `filter`, ordered by id.
    pub async fn get_songs(&self, ctx: &RequestContext, filter: SongFilter) -> Result<Vec<Song>> {
        let filter = filter.normalized();
        filter.validate()?;
        self.repo
            .get_songs(ctx, &filter)
            .await
            .context("failed to get songs")
    }
}
