//! MOTD Artisan Library
//!
//! This module exposes the cache, fetcher, display and command layers for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod fetch;
