//! Song listing filter query builder.
//!
//! Converts a [`SongFilter`] into a parameterized SQL WHERE clause over the
//! `songs s JOIN group_songs g` listing query.

use chrono::NaiveDate;
use uuid::Uuid;

use songbook_core::SongFilter;

use crate::escape_like;

/// Type-safe parameter binding for SQL queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Single UUID parameter.
    Uuid(Uuid),
    /// String parameter (already LIKE-escaped for substring predicates).
    String(String),
    /// Calendar date parameter.
    Date(NaiveDate),
}

/// Generates the WHERE clause fragment for song listing.
///
/// Substring predicates (`group`, `song`, `text`) compile to a case-sensitive
/// `LIKE '%' || $n || '%'` with wildcards in user input escaped. Equality
/// predicates (`song_id`, `release_date`, `link`) compile to `=`. Predicates
/// that are `None` or empty are left out of the SQL.
///
/// # Example
///
/// ```rust,ignore
/// use songbook_db::song_filter::{SongFilterQueryBuilder, QueryParam};
/// use songbook_core::SongFilter;
///
/// let filter = SongFilter {
///     group: Some("Muse".to_string()),
///     ..SongFilter::new(10, 0)
/// };
/// let (sql, params) = SongFilterQueryBuilder::new(&filter, 0).build();
/// // sql: "g.group_name LIKE '%' || $1 || '%' ESCAPE '\'"
/// // params: [QueryParam::String("Muse")]
/// ```
pub struct SongFilterQueryBuilder<'a> {
    filter: &'a SongFilter,
    param_offset: usize,
}

impl<'a> SongFilterQueryBuilder<'a> {
    /// Create a new builder for the given filter.
    ///
    /// `param_offset` is the number of parameters already bound in the query.
    pub fn new(filter: &'a SongFilter, param_offset: usize) -> Self {
        Self {
            filter,
            param_offset,
        }
    }

    /// Build the WHERE clause fragment and its parameters, in binding order.
    ///
    /// An unconstrained filter yields `("TRUE", [])`.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        let mut param_idx = self.param_offset;

        if let Some(song_id) = self.filter.song_id {
            param_idx += 1;
            clauses.push(format!("g.song_id = ${}", param_idx));
            params.push(QueryParam::Uuid(song_id));
        }

        let substrings = [
            ("g.group_name", &self.filter.group),
            ("s.song", &self.filter.song),
            ("s.text", &self.filter.text),
        ];
        for (column, value) in substrings {
            if let Some(value) = non_empty(value) {
                param_idx += 1;
                clauses.push(format!(
                    "{} LIKE '%' || ${} || '%' ESCAPE '\\'",
                    column, param_idx
                ));
                params.push(QueryParam::String(escape_like(value)));
            }
        }

        if let Some(date) = self.filter.release_date {
            param_idx += 1;
            clauses.push(format!("s.release_date = ${}", param_idx));
            params.push(QueryParam::Date(date));
        }

        if let Some(link) = non_empty(&self.filter.link) {
            param_idx += 1;
            clauses.push(format!("s.link = ${}", param_idx));
            params.push(QueryParam::String(link.to_string()));
        }

        if clauses.is_empty() {
            return ("TRUE".to_string(), params);
        }
        (clauses.join(" AND "), params)
    }

    /// Index of the last parameter [`build`](Self::build) will emit.
    pub fn last_param_index(&self) -> usize {
        self.param_offset + self.filter.active_predicates()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
