//! HTTP song-data client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use songbook_core::{defaults, Error, RequestContext, Result, SongData, SongDataClient};

/// Message surfaced when the song-data API rejects a lookup.
pub const API_REQUEST_FAILED: &str = "api request failed";

/// Configuration for [`HttpSongDataClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDataConfig {
    /// Base address of the song-data API, e.g. `http://songdata:8080`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SongDataConfig {
    /// Configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(defaults::SONG_DATA_TIMEOUT_MS),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Song-data API client over one shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpSongDataClient {
    client: Client,
    info_url: String,
    timeout: Duration,
}

impl HttpSongDataClient {
    /// Create a new client.
    pub fn new(config: SongDataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let info_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            defaults::SONG_DATA_INFO_PATH
        );

        info!(
            subsystem = "enrichment",
            component = "song_data_client",
            url = %info_url,
            timeout_ms = config.timeout.as_millis() as u64,
            "Initializing song-data client"
        );

        Ok(Self {
            client,
            info_url,
            timeout: config.timeout,
        })
    }

    /// Full lookup URL, without the query string.
    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    /// Configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl SongDataClient for HttpSongDataClient {
    async fn get_song_data(
        &self,
        ctx: &RequestContext,
        group: &str,
        song: &str,
    ) -> Result<SongData> {
        if group.is_empty() || song.is_empty() {
            return Err(Error::InvalidInput(
                "group and song must not be empty".to_string(),
            ));
        }

        let start = Instant::now();
        let response = self
            .client
            .get(&self.info_url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| Error::Request(format!("song-data request failed: {}", e)))?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        match status {
            StatusCode::OK => {
                let data: SongData = response.json().await.map_err(Error::from)?;
                debug!(
                    request_id = %ctx.request_id,
                    subsystem = "enrichment",
                    component = "song_data_client",
                    op = "get_song_data",
                    status = status.as_u16(),
                    duration_ms,
                    "Song data fetched"
                );
                Ok(data)
            }
            StatusCode::BAD_REQUEST => {
                debug!(
                    request_id = %ctx.request_id,
                    subsystem = "enrichment",
                    component = "song_data_client",
                    op = "get_song_data",
                    status = status.as_u16(),
                    duration_ms,
                    "Song-data API rejected lookup"
                );
                Err(Error::InvalidInput(API_REQUEST_FAILED.to_string()))
            }
            _ => {
                warn!(
                    request_id = %ctx.request_id,
                    subsystem = "enrichment",
                    component = "song_data_client",
                    op = "get_song_data",
                    status = status.as_u16(),
                    duration_ms,
                    "Song-data API returned unexpected status, continuing without enrichment"
                );
                Ok(SongData::default())
            }
        }
    }
}
