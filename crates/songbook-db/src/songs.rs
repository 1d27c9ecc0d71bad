//! Song repository implementation.
//!
//! A song is stored as two rows: intrinsic data in `songs` and the group
//! association in `group_songs`. Every write touches both inside one
//! transaction; a transaction dropped without `commit` rolls back.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use songbook_core::{
    Error, RequestContext, Result, Song, SongData, SongFilter, SongRepository,
};

use crate::song_filter::{QueryParam, SongFilterQueryBuilder};

/// Columns selected by the listing query, in `map_row_to_song` order.
const SONG_COLUMNS: &str =
    "g.song_id, g.group_name, s.song, s.release_date, s.text, s.link";

/// PostgreSQL implementation of SongRepository.
#[derive(Clone)]
pub struct PgSongRepository {
    pool: Pool<Postgres>,
}

impl PgSongRepository {
    /// Create a new PgSongRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert both rows of `song` in an existing transaction.
    pub async fn create_song_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        song: &Song,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO songs (song_id, song, release_date, text, link) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(song.song_id)
        .bind(&song.song)
        .bind(song.data.release_date)
        .bind(&song.data.text)
        .bind(&song.data.link)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        sqlx::query("INSERT INTO group_songs (song_id, group_name) VALUES ($1, $2)")
            .bind(song.song_id)
            .bind(&song.group)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        Ok(())
    }

    /// Overwrite both rows of `song.song_id` in an existing transaction.
    ///
    /// Rows are locked association first, then song, the same order
    /// [`delete_song_tx`](Self::delete_song_tx) uses.
    ///
    /// Returns the number of `songs` rows updated (0 for an unknown id).
    pub async fn edit_song_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        song: &Song,
    ) -> Result<u64> {
        sqlx::query("UPDATE group_songs SET group_name = $2 WHERE song_id = $1")
            .bind(song.song_id)
            .bind(&song.group)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        let updated = sqlx::query(
            "UPDATE songs SET song = $2, release_date = $3, text = $4, link = $5 WHERE song_id = $1",
        )
        .bind(song.song_id)
        .bind(&song.song)
        .bind(song.data.release_date)
        .bind(&song.data.text)
        .bind(&song.data.link)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?
        .rows_affected();

        Ok(updated)
    }

    /// Delete the association row, then the song row, in an existing
    /// transaction.
    ///
    /// Returns the number of `songs` rows deleted (0 for an unknown id).
    pub async fn delete_song_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        song_id: Uuid,
    ) -> Result<u64> {
        sqlx::query("DELETE FROM group_songs WHERE song_id = $1")
            .bind(song_id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        let deleted = sqlx::query("DELETE FROM songs WHERE song_id = $1")
            .bind(song_id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        Ok(deleted)
    }
}

fn map_row_to_song(row: &sqlx::postgres::PgRow) -> Song {
    Song {
        song_id: row.get("song_id"),
        group: row.get("group_name"),
        song: row.get("song"),
        data: SongData {
            release_date: row.get("release_date"),
            text: row.get("text"),
            link: row.get("link"),
        },
    }
}

#[async_trait]
impl SongRepository for PgSongRepository {
    async fn create_song(&self, ctx: &RequestContext, song: &Song) -> Result<()> {
        let start = Instant::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        self.create_song_tx(&mut tx, song).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            request_id = %ctx.request_id,
            subsystem = "db",
            component = "songs",
            op = "create_song",
            song_id = %song.song_id,
            group = %song.group,
            duration_ms = start.elapsed().as_millis() as u64,
            "Song created"
        );
        Ok(())
    }

    async fn edit_song(&self, ctx: &RequestContext, song: &Song) -> Result<()> {
        let start = Instant::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let rows_affected = self.edit_song_tx(&mut tx, song).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            request_id = %ctx.request_id,
            subsystem = "db",
            component = "songs",
            op = "edit_song",
            song_id = %song.song_id,
            rows_affected,
            duration_ms = start.elapsed().as_millis() as u64,
            "Song edited"
        );
        Ok(())
    }

    async fn delete_song(&self, ctx: &RequestContext, song_id: Uuid) -> Result<()> {
        let start = Instant::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let rows_affected = self.delete_song_tx(&mut tx, song_id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            request_id = %ctx.request_id,
            subsystem = "db",
            component = "songs",
            op = "delete_song",
            song_id = %song_id,
            rows_affected,
            duration_ms = start.elapsed().as_millis() as u64,
            "Song deleted"
        );
        Ok(())
    }

    async fn get_song_text(&self, ctx: &RequestContext, song_id: Uuid) -> Result<String> {
        let row = sqlx::query("SELECT text FROM songs WHERE song_id = $1")
            .bind(song_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            request_id = %ctx.request_id,
            subsystem = "db",
            component = "songs",
            op = "get_song_text",
            song_id = %song_id,
            found = row.is_some(),
            "Song text lookup"
        );

        match row {
            Some(row) => Ok(row.get("text")),
            None => Err(Error::NotFound("song not found".to_string())),
        }
    }

    async fn get_songs(&self, ctx: &RequestContext, filter: &SongFilter) -> Result<Vec<Song>> {
        let start = Instant::now();
        let builder = SongFilterQueryBuilder::new(filter, 0);
        let (where_clause, params) = builder.build();
        let limit_idx = builder.last_param_index() + 1;

        let sql = format!(
            "SELECT {} FROM songs s JOIN group_songs g ON g.song_id = s.song_id \
             WHERE {} ORDER BY g.song_id ASC LIMIT ${} OFFSET ${}",
            SONG_COLUMNS,
            where_clause,
            limit_idx,
            limit_idx + 1
        );

        let mut q = sqlx::query(&sql);
        for param in params {
            q = match param {
                QueryParam::Uuid(id) => q.bind(id),
                QueryParam::String(s) => q.bind(s),
                QueryParam::Date(d) => q.bind(d),
            };
        }
        let rows = q
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let songs: Vec<Song> = rows.iter().map(map_row_to_song).collect();

        debug!(
            request_id = %ctx.request_id,
            subsystem = "db",
            component = "songs",
            op = "get_songs",
            active_predicates = filter.active_predicates(),
            limit = filter.limit,
            offset = filter.offset,
            result_count = songs.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Songs listed"
        );
        Ok(songs)
    }
}
