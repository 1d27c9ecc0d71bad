//! # songbook-core
//!
//! Core types, traits, and the error taxonomy for the songbook catalog.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the store, the enrichment client and the service depend on.

pub mod context;
pub mod couplets;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use context::RequestContext;
pub use couplets::{
    couplet_count, join_couplets, paginate_couplets, split_couplets, COUPLET_DELIMITER,
};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use models::*;
pub use traits::*;
