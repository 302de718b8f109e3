//! Cache module for storing ASCII art on disk
//!
//! This module provides a bounded, FIFO-evicting store of art keyed by a short
//! content hash. Each artwork is kept as `<id>.txt` with a `<id>.json` metadata
//! sidecar, and `metadata.json` records insertion order.

pub mod id;
mod index;
mod manager;

pub use id::{content_id, validate_id};
pub use index::{ArtRecord, CacheIndex, IndexEntry};
pub use manager::{ArtCache, CacheError, ImportOptions};
