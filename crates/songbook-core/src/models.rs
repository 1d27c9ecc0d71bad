//! Catalog data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Song {
    /// System-generated identifier, immutable once assigned.
    #[serde(rename = "songID")]
    pub song_id: Uuid,
    /// Artist or group name.
    pub group: String,
    /// Song title.
    pub song: String,
    /// Enrichment payload.
    #[serde(default)]
    pub data: SongData,
}

/// Enrichment payload attached to a [`Song`].
///
/// An all-empty value (see [`SongData::is_empty`]) means enrichment was
/// unavailable when the song was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongData {
    /// Release date, `DD.MM.YYYY` on the wire.
    #[serde(default, with = "release_date")]
    #[schema(value_type = Option<String>, example = "16.07.2006")]
    pub release_date: Option<NaiveDate>,
    /// Full lyrics, couplets separated by a blank line.
    #[serde(default)]
    pub text: String,
    /// Reference to the source.
    #[serde(default)]
    pub link: String,
}

impl SongData {
    /// True when no enrichment field is populated.
    pub fn is_empty(&self) -> bool {
        self.release_date.is_none() && self.text.is_empty() && self.link.is_empty()
    }
}

/// Creation payload: everything else is system generated or enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewSong {
    pub group: String,
    pub song: String,
}

/// Predicates and window for listing songs.
///
/// Every predicate is optional; `None` and `Some("")` both mean
/// "no constraint on that field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    /// Exact match.
    pub song_id: Option<Uuid>,
    /// Substring match.
    pub group: Option<String>,
    /// Substring match.
    pub song: Option<String>,
    /// Exact match.
    pub release_date: Option<NaiveDate>,
    /// Substring match.
    pub text: Option<String>,
    /// Exact match.
    pub link: Option<String>,
    /// Maximum rows returned (> 0).
    pub limit: i64,
    /// Rows skipped after filtering (>= 0).
    pub offset: i64,
}

impl SongFilter {
    /// A filter with no predicates.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    /// Fold empty string predicates into `None`.
    pub fn normalized(mut self) -> Self {
        fn fold(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        self.group = fold(self.group);
        self.song = fold(self.song);
        self.text = fold(self.text);
        self.link = fold(self.link);
        self
    }

    /// Check the pagination window.
    pub fn validate(&self) -> Result<()> {
        if self.limit <= 0 {
            return Err(Error::InvalidInput("limit must be >= 1".to_string()));
        }
        if self.offset < 0 {
            return Err(Error::InvalidInput("offset must be >= 0".to_string()));
        }
        Ok(())
    }

    /// Number of predicates that constrain the result.
    pub fn active_predicates(&self) -> usize {
        let strings = [&self.group, &self.song, &self.text, &self.link]
            .iter()
            .filter(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
            .count();
        strings + usize::from(self.song_id.is_some()) + usize::from(self.release_date.is_some())
    }
}

/// Wire format for release dates.
///
/// Serializes as `DD.MM.YYYY`. Deserializes `DD.MM.YYYY`, ISO `YYYY-MM-DD`
/// or an RFC 3339 timestamp (the timestamp's own calendar date is kept);
/// `null` and `""` become `None`.
pub mod release_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Format used by the song-data API.
    pub const FORMAT: &str = "%d.%m.%Y";

    /// ISO 8601 calendar date.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Parse a date in any accepted format.
    pub fn parse(s: &str) -> Result<NaiveDate, String> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s, ISO_FORMAT))
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|d| d.date_naive()))
            .map_err(|_| {
                format!(
                    "invalid release date '{}': expected DD.MM.YYYY (e.g. '16.07.2006'), YYYY-MM-DD or RFC 3339",
                    s
                )
            })
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s).map(Some).map_err(de::Error::custom),
        }
    }
}
