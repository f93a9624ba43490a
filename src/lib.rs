//! Core library surface for the song library HTTP service.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces
//! that the router glues together.

pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod server;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to initialize the embedded SQLite store, and
/// by tests to apply the real schema to an in-memory database.
pub use db::{apply_schema, ensure_schema};

/// The primary domain types other layers manipulate.
pub use models::{NewSong, Song, SongInfo, SongPatch};

pub use config::Config;
pub use enrichment::EnrichmentClient;
pub use error::LibraryError;
pub use server::create_router;
