//! Process configuration assembled once at startup. The rest of the code
//! receives an immutable `Config` by reference instead of reading the
//! environment on its own.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".song-library-api";
/// SQLite file name used when `DATABASE_URL` does not override the location.
const DB_FILE_NAME: &str = "songs.sqlite";
/// Port the HTTP listener binds when `PORT` is absent or unparsable.
const DEFAULT_PORT: u16 = 8080;

/// Immutable runtime configuration, read from the environment once in
/// `main` and passed to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filesystem path of the SQLite database.
    pub database_path: PathBuf,
    /// Base URL of the enrichment service; `None` disables enrichment.
    pub external_api_url: Option<String>,
    /// TCP port for the HTTP listener.
    pub port: u16,
}

impl Config {
    /// Read the recognized environment keys: `DATABASE_URL`,
    /// `EXTERNAL_API_URL`, and `PORT`. Absent keys fall back to defaults so
    /// a bare `cargo run` still brings up a working local instance.
    pub fn from_env() -> Result<Self> {
        let database_path = match env::var("DATABASE_URL") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };

        let external_api_url = env::var("EXTERNAL_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Config {
            database_path,
            external_api_url,
            port,
        })
    }
}

/// Resolve the default database location inside the user's home directory.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
