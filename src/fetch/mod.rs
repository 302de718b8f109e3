//! Fetching ASCII art from an OpenAI-compatible chat completions API
//!
//! The fetcher turns a theme and style into a prompt, asks the model for art and
//! trims the answer to the configured dimensions before it reaches the cache.

mod client;
pub mod prompts;

pub use client::{truncate_art, ArtFetcher, FetchError, FetchedArt};
