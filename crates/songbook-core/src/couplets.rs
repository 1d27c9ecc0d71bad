//! Couplet-level pagination of lyrics.
//!
//! A couplet is a stanza delimited by a blank line. Splitting on
//! [`COUPLET_DELIMITER`] and joining with it reproduces the input exactly, so
//! any text has at least one couplet (an empty text is one empty couplet).

use crate::error::{Error, Result};

/// Blank-line delimiter between couplets.
pub const COUPLET_DELIMITER: &str = "\n\n";

/// Split lyrics into their ordered couplets. Never returns an empty vector.
pub fn split_couplets(text: &str) -> Vec<&str> {
    text.split(COUPLET_DELIMITER).collect()
}

/// Join couplets back into lyrics.
pub fn join_couplets(couplets: &[&str]) -> String {
    couplets.join(COUPLET_DELIMITER)
}

/// Number of couplets in `text`.
pub fn couplet_count(text: &str) -> usize {
    text.matches(COUPLET_DELIMITER).count() + 1
}

/// Return couplets `[offset, offset + limit)` of `text`, rejoined.
///
/// The window must lie entirely within the text: a window reaching past the
/// last couplet is rejected, not truncated. `limit == 0` yields `""`.
pub fn paginate_couplets(text: &str, limit: usize, offset: usize) -> Result<String> {
    let couplets = split_couplets(text);
    let end = offset
        .checked_add(limit)
        .filter(|end| *end <= couplets.len())
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "requested couplets {}..{} exceed the song's {} couplets",
                offset,
                offset.saturating_add(limit),
                couplets.len()
            ))
        })?;

    Ok(join_couplets(&couplets[offset..end]))
}
