//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Entity store (venues, artists, shows) on SQLite
//! - Aggregate query layer (grouped listings, detail views, search)
//! - Error taxonomy
//! - Configuration loading
//! - Time helpers

pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod time;

pub use error::{Error, Result};
