use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Ensure the database file exists, run the lazy migration, and return a
/// live connection. Parent directories are created on first run so a fresh
/// checkout works without manual setup.
pub fn ensure_schema(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Create the single `songs` table if it is missing. Optional fields are
/// stored as empty strings rather than NULL so partial updates and JSON
/// serialization never juggle `Option`s. Public so tests can apply the real
/// schema to an in-memory database.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name TEXT NOT NULL,
            song TEXT NOT NULL,
            release_date TEXT NOT NULL DEFAULT '',
            text TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .context("failed to create songs table")?;

    Ok(())
}
