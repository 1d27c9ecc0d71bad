//! HTTP handlers for songbook-api.

pub mod songs;
