//! Queries against the `songs` table. Every function wraps one statement so
//! the HTTP layer can stay focused on request translation, and every failure
//! comes back as a tagged `LibraryError` so handlers map statuses without
//! inspecting strings.

use rusqlite::{params, Connection, Row, ToSql};

use crate::error::{LibraryError, Result};
use crate::models::{NewSong, Song, SongPatch};

/// Optional filters for the library listing. Each present filter is ANDed
/// onto the query; absent filters impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    /// Case-insensitive substring match on the group name.
    pub group: Option<String>,
    /// Case-insensitive substring match on the song title.
    pub song: Option<String>,
    /// Exact match on the release date string.
    pub release_date: Option<String>,
}

/// Column list shared by every SELECT so row mapping stays in one place.
const SONG_COLUMNS: &str = "id, group_name, song, release_date, text, link";

fn map_song_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        group: row.get(1)?,
        song: row.get(2)?,
        release_date: row.get(3)?,
        text: row.get(4)?,
        link: row.get(5)?,
    })
}

/// Fetch one page of songs matching `filter`.
///
/// Substring filters lower both sides of a LIKE so matching is
/// case-insensitive regardless of collation. Rows come back in rowid order;
/// no ordering is promised to callers. An empty page is a normal result,
/// not an error.
pub fn search_songs(
    conn: &Connection,
    filter: &SongFilter,
    page: u32,
    page_size: u32,
) -> Result<Vec<Song>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(group) = &filter.group {
        clauses.push("LOWER(group_name) LIKE '%' || LOWER(?) || '%'");
        params.push(Box::new(group.clone()));
    }
    if let Some(song) = &filter.song {
        clauses.push("LOWER(song) LIKE '%' || LOWER(?) || '%'");
        params.push(Box::new(song.clone()));
    }
    if let Some(release_date) = &filter.release_date {
        clauses.push("release_date = ?");
        params.push(Box::new(release_date.clone()));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let sql = format!("SELECT {SONG_COLUMNS} FROM songs{where_sql} LIMIT ? OFFSET ?");
    params.push(Box::new(page_size));
    params.push(Box::new(offset));

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let songs = stmt
        .query_map(param_refs.as_slice(), map_song_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(songs)
}

/// Insert a new song and echo the hydrated record, including the id the
/// store assigned, so callers can respond without re-querying.
pub fn create_song(conn: &Connection, song: &NewSong) -> Result<Song> {
    conn.execute(
        "INSERT INTO songs (group_name, song, release_date, text, link)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![song.group, song.song, song.release_date, song.text, song.link],
    )?;

    let id = conn.last_insert_rowid();
    Ok(Song {
        id,
        group: song.group.clone(),
        song: song.song.clone(),
        release_date: song.release_date.clone(),
        text: song.text.clone(),
        link: song.link.clone(),
    })
}

/// Load a single song by id, translating the no-rows case into `NotFound`.
pub fn fetch_song(conn: &Connection, id: i64) -> Result<Song> {
    conn.query_row(
        &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
        [id],
        map_song_row,
    )
    .map_err(|err| match err {
        rusqlite::Error::QueryReturnedNoRows => LibraryError::NotFound(id),
        other => LibraryError::Store(other),
    })
}

/// Merge the non-empty fields of `patch` into the stored record and return
/// the row as stored after the merge.
///
/// Absent and empty fields are left untouched, so an update cannot clear a
/// field back to the empty string. An id without a record fails with
/// `NotFound` before any write; a patch with nothing to apply returns the
/// stored record unchanged.
pub fn update_song(conn: &Connection, id: i64, patch: &SongPatch) -> Result<Song> {
    // Existence check up front so a bad id is a not-found, not a no-op.
    fetch_song(conn, id)?;

    let mut assignments: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(group) = provided(&patch.group) {
        assignments.push("group_name = ?");
        params.push(Box::new(group.to_string()));
    }
    if let Some(song) = provided(&patch.song) {
        assignments.push("song = ?");
        params.push(Box::new(song.to_string()));
    }
    if let Some(release_date) = provided(&patch.release_date) {
        assignments.push("release_date = ?");
        params.push(Box::new(release_date.to_string()));
    }
    if let Some(text) = provided(&patch.text) {
        assignments.push("text = ?");
        params.push(Box::new(text.to_string()));
    }
    if let Some(link) = provided(&patch.link) {
        assignments.push("link = ?");
        params.push(Box::new(link.to_string()));
    }

    if !assignments.is_empty() {
        let sql = format!("UPDATE songs SET {} WHERE id = ?", assignments.join(", "));
        params.push(Box::new(id));

        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, param_refs.as_slice())?;
    }

    fetch_song(conn, id)
}

/// A patch field participates in the merge only when it is present and
/// non-empty in the payload.
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Permanently delete a song, surfacing `NotFound` when nothing was stored
/// under the id.
pub fn delete_song(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM songs WHERE id = ?1", params![id])?;

    if deleted == 0 {
        Err(LibraryError::NotFound(id))
    } else {
        Ok(())
    }
}
