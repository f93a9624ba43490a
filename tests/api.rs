//! End-to-end exercises of the HTTP surface: the real router over an
//! in-memory database, driven without a socket. No enrichment client is
//! configured, so creation stores exactly what the request carries.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde_json::{json, Value};
use tower::ServiceExt;

use song_library_api::{apply_schema, create_router};

fn test_app() -> Router {
    let conn = Connection::open_in_memory().expect("in-memory database");
    apply_schema(&conn).expect("schema");
    create_router(conn, None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

async fn create(app: &Router, body: Value) -> i64 {
    let (status, song) = send(app, "POST", "/library", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    song["id"].as_i64().expect("assigned id")
}

#[tokio::test]
async fn create_then_read_back_round_trip() {
    let app = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/library",
        Some(json!({"group": "Muse", "song": "Supermassive Black Hole"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().expect("assigned id");
    assert!(id > 0);
    assert_eq!(created["group"], "Muse");
    assert_eq!(created["song"], "Supermassive Black Hole");
    assert_eq!(created["releaseDate"], "");
    assert_eq!(created["text"], "");
    assert_eq!(created["link"], "");

    let (status, fetched) = send(&app, "GET", &format!("/library/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_without_required_fields_is_rejected() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/library", Some(json!({"group": "Muse"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "POST", "/library", Some(json!({"song": "Uprising"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, listed) = send(&app, "GET", "/library", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let app = test_app();

    for n in 1..=7 {
        create(&app, json!({"group": "Muse", "song": format!("Track {n}")})).await;
    }
    create(&app, json!({"group": "The Beatles", "song": "Help"})).await;

    // Case-insensitive substring match plus an offset past the first page.
    let (status, listed) = send(&app, "GET", "/library?group=muse&page=2&pageSize=5", None).await;
    assert_eq!(status, StatusCode::OK);

    let songs = listed.as_array().expect("song list");
    assert_eq!(songs.len(), 2);
    for song in songs {
        assert_eq!(song["group"], "Muse");
    }
}

#[tokio::test]
async fn unparsable_pagination_falls_back_to_defaults() {
    let app = test_app();

    for n in 1..=12 {
        create(&app, json!({"group": "Muse", "song": format!("Track {n}")})).await;
    }

    let (status, listed) = send(&app, "GET", "/library?page=abc&pageSize=-3", None).await;
    assert_eq!(status, StatusCode::OK);
    // Defaults: page 1, ten records per page.
    assert_eq!(listed.as_array().expect("song list").len(), 10);
}

#[tokio::test]
async fn partial_update_merges_non_empty_fields() {
    let app = test_app();

    let id = create(
        &app,
        json!({"group": "A", "song": "B", "text": "old", "link": "http://example.com"}),
    )
    .await;

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/library/{id}"),
        Some(json!({"text": "new", "link": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["group"], "A");
    assert_eq!(updated["song"], "B");
    assert_eq!(updated["text"], "new");
    // An empty payload field is not applied, so the link survives.
    assert_eq!(updated["link"], "http://example.com");
}

#[tokio::test]
async fn update_of_missing_song_is_not_found() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "PUT",
        "/library/99999",
        Some(json!({"text": "anything"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_confirms_then_turns_not_found() {
    let app = test_app();
    let id = create(&app, json!({"group": "Muse", "song": "Uprising"})).await;

    let (status, body) = send(&app, "DELETE", &format!("/library/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "DELETE", &format!("/library/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/library/99999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn song_text_is_paginated_by_verses() {
    let app = test_app();

    let id = create(
        &app,
        json!({
            "group": "Muse",
            "song": "Uprising",
            "text": "verse one\n\nverse two\n\nverse three",
        }),
    )
    .await;

    let (status, page) = send(
        &app,
        "GET",
        &format!("/library/{id}/text?page=2&pageSize=1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 2);
    assert_eq!(page["pageSize"], 1);
    assert_eq!(page["text"], "verse two");

    // An out-of-range page is a valid, empty window.
    let (status, page) = send(
        &app,
        "GET",
        &format!("/library/{id}/text?page=100&pageSize=10"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["text"], "");

    let (status, _) = send(&app, "GET", "/library/99999/text", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
