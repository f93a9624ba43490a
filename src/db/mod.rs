//! Persistence module split across logical submodules.

mod connection;
pub mod songs;

pub use connection::{apply_schema, ensure_schema};
pub use songs::{create_song, delete_song, fetch_song, search_songs, update_song, SongFilter};
