//! # songbook-db
//!
//! PostgreSQL catalog store for songbook.
//!
//! This crate provides:
//! - Connection pool management
//! - The PostgreSQL [`SongRepository`] implementation
//! - The song listing filter query builder
//! - An in-memory repository for service and transport tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use songbook_db::{Database, RequestContext, SongFilter, SongRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/songbook").await?;
//!
//!     let songs = db.songs.get_songs(&RequestContext::new(), &SongFilter::new(10, 0)).await?;
//!     println!("{} songs", songs.len());
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod pool;
pub mod song_filter;
pub mod songs;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use songbook_core::*;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Re-export repository implementations
pub use memory::InMemorySongRepository;
pub use pool::{create_pool, log_pool_metrics, PoolConfig};
pub use song_filter::{QueryParam, SongFilterQueryBuilder};
pub use songs::PgSongRepository;

/// Combined database context: the pool plus the song repository.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Song repository for catalog operations.
    pub songs: PgSongRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            songs: PgSongRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url, PoolConfig::default()).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
