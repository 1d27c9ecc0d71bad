//! Centralized default constants for songbook.
//!
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

// =============================================================================
// DATABASE
// =============================================================================

/// Default PostgreSQL host when `DATABASE_URL` is not set.
pub const DB_HOST: &str = "localhost";

/// Default PostgreSQL port.
pub const DB_PORT: u16 = 5432;

/// Default PostgreSQL user and database name.
pub const DB_NAME: &str = "songbook";

/// Maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a pooled connection (seconds).
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Per-request timeout for the song-data API (milliseconds).
pub const SONG_DATA_TIMEOUT_MS: u64 = 1000;

/// Lookup path on the song-data API.
pub const SONG_DATA_INFO_PATH: &str = "/info";

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum stored length of a group name (matches the `group_songs` column).
pub const GROUP_NAME_MAX_LEN: usize = 255;
