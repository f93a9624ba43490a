//! Domain models that mirror the SQLite schema and the JSON wire format.
//! The intent is that these types stay light-weight data holders so other
//! layers can focus on request translation and persistence logic. Field
//! names on the wire are exactly `id`, `group`, `song`, `releaseDate`,
//! `text`, `link`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One catalog entry as stored and as returned to clients.
pub struct Song {
    /// Primary key assigned by the store. Immutable once assigned; edit and
    /// delete flows bubble it back to the persistence layer.
    pub id: i64,
    /// Performing artist or group name. Free text, required on creation.
    pub group: String,
    /// Track title. Free text, required on creation.
    pub song: String,
    /// Free-text date string; no format is enforced.
    pub release_date: String,
    /// Full lyrics, verses separated by a blank line (double newline).
    pub text: String,
    /// URL reference, kept as raw text so non-web references also fit.
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Incoming payload for song creation. Every field defaults to empty so a
/// missing required field reaches validation as `""` and comes back as a
/// 400 rather than a deserialization rejection.
pub struct NewSong {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Partial update payload. A field participates in the merge only when it is
/// present and non-empty, so clients cannot clear a stored value back to the
/// empty string through an update.
pub struct SongPatch {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Response body of the external metadata service. Transient, never
/// persisted directly; its fields backfill the corresponding `Song` fields
/// before creation. Missing fields decode as empty strings.
pub struct SongInfo {
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}
