//! In-memory song repository for testing.
//!
//! Mirrors the observable behavior of [`PgSongRepository`](crate::PgSongRepository):
//! id ordering, case-sensitive substring matching, the `group_songs` length
//! limit, and no-op edits/deletes for unknown ids.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use songbook_db::InMemorySongRepository;
//!
//! let repo = InMemorySongRepository::new().with_songs(vec![song]);
//! let songs = repo.get_songs(&ctx, &SongFilter::new(10, 0)).await?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use songbook_core::{
    defaults, Error, RequestContext, Result, Song, SongFilter, SongRepository,
};

/// In-memory implementation of SongRepository.
#[derive(Clone, Default)]
pub struct InMemorySongRepository {
    songs: Arc<RwLock<BTreeMap<Uuid, Song>>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl InMemorySongRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with `songs`.
    pub fn with_songs(self, songs: impl IntoIterator<Item = Song>) -> Self {
        // Fresh repository, the lock cannot be contended yet.
        if let Ok(mut map) = self.songs.try_write() {
            map.extend(songs.into_iter().map(|s| (s.song_id, s)));
        }
        self
    }

    /// Make every write fail with a database error.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Make every read fail with a database error.
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Number of stored songs.
    pub async fn len(&self) -> usize {
        self.songs.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.songs.read().await.is_empty()
    }

    /// Snapshot of one stored song.
    pub async fn get(&self, song_id: Uuid) -> Option<Song> {
        self.songs.read().await.get(&song_id).cloned()
    }

    fn check_writes(&self) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn check_group_len(song: &Song) -> Result<()> {
    if song.group.chars().count() > defaults::GROUP_NAME_MAX_LEN {
        return Err(Error::Database(sqlx::Error::Protocol(format!(
            "value too long for type character varying({})",
            defaults::GROUP_NAME_MAX_LEN
        ))));
    }
    Ok(())
}

fn contains(haystack: &str, needle: &Option<String>) -> bool {
    match needle.as_deref() {
        Some(n) if !n.is_empty() => haystack.contains(n),
        _ => true,
    }
}

fn matches(song: &Song, filter: &SongFilter) -> bool {
    filter.song_id.map_or(true, |id| song.song_id == id)
        && contains(&song.group, &filter.group)
        && contains(&song.song, &filter.song)
        && contains(&song.data.text, &filter.text)
        && filter
            .release_date
            .map_or(true, |d| song.data.release_date == Some(d))
        && match filter.link.as_deref() {
            Some(l) if !l.is_empty() => song.data.link == l,
            _ => true,
        }
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
    async fn create_song(&self, _ctx: &RequestContext, song: &Song) -> Result<()> {
        self.check_writes()?;
        check_group_len(song)?;
        let mut songs = self.songs.write().await;
        if songs.contains_key(&song.song_id) {
            return Err(Error::Database(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint \"songs_pkey\"".to_string(),
            )));
        }
        songs.insert(song.song_id, song.clone());
        Ok(())
    }

    async fn edit_song(&self, _ctx: &RequestContext, song: &Song) -> Result<()> {
        self.check_writes()?;
        check_group_len(song)?;
        if let Some(existing) = self.songs.write().await.get_mut(&song.song_id) {
            *existing = song.clone();
        }
        Ok(())
    }

    async fn delete_song(&self, _ctx: &RequestContext, song_id: Uuid) -> Result<()> {
        self.check_writes()?;
        self.songs.write().await.remove(&song_id);
        Ok(())
    }

    async fn get_song_text(&self, _ctx: &RequestContext, song_id: Uuid) -> Result<String> {
        self.check_reads()?;
        self.songs
            .read()
            .await
            .get(&song_id)
            .map(|s| s.data.text.clone())
            .ok_or_else(|| Error::NotFound("song not found".to_string()))
    }

    async fn get_songs(&self, _ctx: &RequestContext, filter: &SongFilter) -> Result<Vec<Song>> {
        self.check_reads()?;
        let offset = usize::try_from(filter.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .songs
            .read()
            .await
            .values()
            .filter(|s| matches(s, filter))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
