//! # songbook-enrichment
//!
//! Client for the song-data API that supplies release date, lyrics and link
//! for a `(group, song)` pair at creation time.
//!
//! ## Status policy
//!
//! | Remote status | Result |
//! |---------------|--------|
//! | 200 | decoded [`SongData`](songbook_core::SongData) |
//! | 400 | `BadRequest("api request failed")` |
//! | anything else | empty `SongData`, logged at WARN |
//! | transport failure / timeout | `Internal` |

pub mod client;

// Scripted client for service and transport tests
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{HttpSongDataClient, SongDataConfig, API_REQUEST_FAILED};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockOutcome, MockSongDataClient};
