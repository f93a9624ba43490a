//! HTTP surface: the axum router and the handlers translating requests into
//! record store operations and JSON responses.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::db::SongFilter;
use crate::enrichment::EnrichmentClient;
use crate::error::{LibraryError, Result};
use crate::lyrics;
use crate::models::{NewSong, Song, SongPatch};

/// Fallback page number when the query string is absent or unparsable.
const DEFAULT_PAGE: u32 = 1;
/// Fallback page size for both record listing and verse pagination.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Shared state handed to every handler. The single SQLite connection is
/// serialized behind an async mutex; the store's statement-level atomicity
/// is the only consistency guarantee this layer relies on, so concurrent
/// updates to the same record resolve as last-writer-wins.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    enrichment: Option<Arc<EnrichmentClient>>,
}

/// Assemble the router over an open database connection. `enrichment` is
/// optional; without it, creation stores exactly what the client sent.
pub fn create_router(conn: Connection, enrichment: Option<EnrichmentClient>) -> Router {
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
        enrichment: enrichment.map(Arc::new),
    };

    Router::new()
        .route("/library", get(list_songs).post(create_song))
        .route(
            "/library/:id",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route("/library/:id/text", get(get_song_text))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Query parameters for `GET /library`. Pagination values arrive as raw
/// strings so unparsable input can fall back to the defaults instead of
/// rejecting the request.
struct ListQuery {
    group: Option<String>,
    song: Option<String>,
    release_date: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Verse window for `GET /library/:id/text`, parsed as leniently as the
/// record pagination.
struct TextQuery {
    page: Option<String>,
    page_size: Option<String>,
}

/// Parse a 1-based positive integer leniently: absence, garbage, and zero
/// all fall back to `default`.
fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

/// Empty query values behave like absent filters, so `?group=` imposes no
/// constraint.
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /library
///
/// Filtered, paginated listing.
async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Song>>> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
    let page_size = parse_positive(query.page_size.as_deref(), DEFAULT_PAGE_SIZE);

    let filter = SongFilter {
        group: none_if_empty(query.group),
        song: none_if_empty(query.song),
        release_date: none_if_empty(query.release_date),
    };
    tracing::debug!(?filter, page, page_size, "listing songs");

    let conn = state.db.lock().await;
    let songs = db::search_songs(&conn, &filter, page, page_size)?;
    Ok(Json(songs))
}

/// POST /library
///
/// Validate, optionally enrich, persist.
async fn create_song(
    State(state): State<AppState>,
    Json(mut payload): Json<NewSong>,
) -> Result<(StatusCode, Json<Song>)> {
    if payload.group.is_empty() || payload.song.is_empty() {
        return Err(LibraryError::Validation(
            "both group and song are required".to_string(),
        ));
    }

    if let Some(client) = &state.enrichment {
        enrich_payload(client, &mut payload).await;
    }

    let conn = state.db.lock().await;
    let song = db::create_song(&conn, &payload)?;
    tracing::info!(id = song.id, "created song");
    Ok((StatusCode::CREATED, Json(song)))
}

/// Backfill release metadata for the fields the client left empty. Failure
/// is logged and swallowed: enrichment is best-effort, never a precondition
/// for storing the record.
async fn enrich_payload(client: &EnrichmentClient, payload: &mut NewSong) {
    if !payload.release_date.is_empty() && !payload.text.is_empty() && !payload.link.is_empty() {
        return;
    }

    match client.fetch_info(&payload.group, &payload.song).await {
        Ok(info) => {
            if payload.release_date.is_empty() {
                payload.release_date = info.release_date;
            }
            if payload.text.is_empty() {
                payload.text = info.text;
            }
            if payload.link.is_empty() {
                payload.link = info.link;
            }
        }
        Err(err) => {
            tracing::warn!("enrichment failed, storing song without it: {err}");
        }
    }
}

/// GET /library/:id
///
/// Fetch one song.
async fn get_song(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Song>> {
    let conn = state.db.lock().await;
    let song = db::fetch_song(&conn, id)?;
    Ok(Json(song))
}

/// PUT /library/:id
///
/// Merge the non-empty payload fields into the stored record.
async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<SongPatch>,
) -> Result<Json<Song>> {
    let conn = state.db.lock().await;
    let song = db::update_song(&conn, id, &patch)?;
    tracing::info!(id, "updated song");
    Ok(Json(song))
}

/// DELETE /library/:id
///
/// Remove the record permanently.
async fn delete_song(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    let conn = state.db.lock().await;
    db::delete_song(&conn, id)?;
    tracing::info!(id, "deleted song");
    Ok(Json(json!({ "message": "song deleted" })))
}

/// GET /library/:id/text
///
/// One page of verses from the stored lyrics. An out-of-range page comes
/// back as an empty text field, not an error.
async fn get_song_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TextQuery>,
) -> Result<Json<Value>> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
    let page_size = parse_positive(query.page_size.as_deref(), DEFAULT_PAGE_SIZE);

    let song = {
        let conn = state.db.lock().await;
        db::fetch_song(&conn, id)?
    };

    let text = lyrics::paginate_verses(&song.text, page as usize, page_size as usize);
    Ok(Json(json!({
        "id": id,
        "page": page,
        "pageSize": page_size,
        "text": text,
    })))
}
