//! Structured logging schema and field name constants for songbook.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Internal failure surfaced to a caller as a generic error |
//! | WARN  | Recoverable issue, soft-fail applied (e.g. enrichment unavailable) |
//! | INFO  | Lifecycle events (startup, shutdown), completed writes |
//! | DEBUG | Operation entry/exit, intermediate values |
//! | TRACE | Per-row iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID of the inbound call. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "service", "db", "enrichment"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "songs", "song_data_client", "catalog"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_song", "get_songs", "get_song_data"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Song UUID being operated on.
pub const SONG_ID: &str = "song_id";

/// Group name of the song being operated on.
pub const GROUP: &str = "group";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of active filter predicates.
pub const ACTIVE_PREDICATES: &str = "active_predicates";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Number of rows affected by a write.
pub const ROWS_AFFECTED: &str = "rows_affected";

// ─── Enrichment fields ─────────────────────────────────────────────────────

/// HTTP status returned by the song-data API.
pub const STATUS: &str = "status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error kind of a failed operation.
pub const ERROR_KIND: &str = "error_kind";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
