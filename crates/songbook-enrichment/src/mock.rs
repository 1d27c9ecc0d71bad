//! Scripted song-data client for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use songbook_enrichment::MockSongDataClient;
//!
//! let client = MockSongDataClient::new()
//!     .with_response("Muse", "Hole", song_data)
//!     .with_rejection("Nobody", "Nothing");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use songbook_core::{Error, RequestContext, Result, SongData, SongDataClient};

use crate::client::API_REQUEST_FAILED;

/// Outcome scripted for one lookup.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Remote returned 200 with this payload.
    Data(SongData),
    /// Remote returned 400.
    Rejected,
    /// Remote unreachable.
    Unavailable,
}

impl MockOutcome {
    fn resolve(&self) -> Result<SongData> {
        match self {
            MockOutcome::Data(data) => Ok(data.clone()),
            MockOutcome::Rejected => Err(Error::InvalidInput(API_REQUEST_FAILED.to_string())),
            MockOutcome::Unavailable => {
                Err(Error::Request("song-data request failed: connection refused".to_string()))
            }
        }
    }
}

/// A recorded lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub group: String,
    pub song: String,
}

#[derive(Debug, Clone)]
struct MockConfig {
    responses: HashMap<(String, String), MockOutcome>,
    default_outcome: MockOutcome,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            // Soft-fail: unknown lookups behave like an unexpected remote status.
            default_outcome: MockOutcome::Data(SongData::default()),
        }
    }
}

/// Mock song-data client for testing.
#[derive(Clone, Default)]
pub struct MockSongDataClient {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockSongDataClient {
    /// Create a mock that returns empty data for every lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `data` for `(group, song)`.
    pub fn with_response(mut self, group: &str, song: &str, data: SongData) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .insert((group.to_string(), song.to_string()), MockOutcome::Data(data));
        self
    }

    /// Reject `(group, song)` the way the remote's 400 does.
    pub fn with_rejection(mut self, group: &str, song: &str) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .insert((group.to_string(), song.to_string()), MockOutcome::Rejected);
        self
    }

    /// Outcome for lookups without a scripted response.
    pub fn with_default(mut self, outcome: MockOutcome) -> Self {
        Arc::make_mut(&mut self.config).default_outcome = outcome;
        self
    }

    /// All lookups made so far, in call order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of lookups made so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().map(|log| log.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SongDataClient for MockSongDataClient {
    async fn get_song_data(
        &self,
        _ctx: &RequestContext,
        group: &str,
        song: &str,
    ) -> Result<SongData> {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(MockCall {
                group: group.to_string(),
                song: song.to_string(),
            });
        }
        self.config
            .responses
            .get(&(group.to_string(), song.to_string()))
            .unwrap_or(&self.config.default_outcome)
            .resolve()
    }
}
