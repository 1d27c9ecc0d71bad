//! Router tests over the in-memory store and the scripted song-data client.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use songbook_api::{router, AppState, CatalogService};
use songbook_core::{Song, SongData};
use songbook_db::InMemorySongRepository;
use songbook_enrichment::MockSongDataClient;

fn app(repo: &InMemorySongRepository, client: MockSongDataClient) -> Router {
    let catalog = CatalogService::new(Arc::new(repo.clone()), Arc::new(client));
    router(AppState::new(catalog))
}

fn song(group: &str, title: &str, text: &str) -> Song {
    Song {
        song_id: Uuid::now_v7(),
        group: group.to_string(),
        song: title.to_string(),
        data: SongData {
            release_date: NaiveDate::from_ymd_opt(2011, 11, 11),
            text: text.to_string(),
            link: "link".to_string(),
        },
    }
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = send(
        app(&InMemorySongRepository::new(), MockSongDataClient::new()),
        Method::GET,
        "/ping",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("pong"));
}

#[tokio::test]
async fn test_request_id_header_is_uuid_v7() {
    let app = app(&InMemorySongRepository::new(), MockSongDataClient::new());
    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .expect("x-request-id header");
    assert_eq!(id.get_version_num(), 7);
}

async fn response_request_id(app: Router, inbound: &str) -> String {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/ping")
                .header("x-request-id", inbound)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string()
}

#[tokio::test]
async fn test_inbound_uuid_request_id_is_kept() {
    let inbound = Uuid::new_v4().to_string();
    let app = app(&InMemorySongRepository::new(), MockSongDataClient::new());
    assert_eq!(response_request_id(app, &inbound).await, inbound);
}

#[tokio::test]
async fn test_inbound_non_uuid_request_id_is_replaced() {
    let app = app(&InMemorySongRepository::new(), MockSongDataClient::new());
    let id = response_request_id(app, "trace-abc-123").await;
    assert_ne!(id, "trace-abc-123");
    assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 7);
}

#[tokio::test]
async fn test_get_songs_filters_by_group() {
    let repo = InMemorySongRepository::new().with_songs(vec![
        song("group1", "song1", ""),
        song("group2", "song2", ""),
    ]);
    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        "/v1/get/songs?limit=1&offset=0&group=2",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["song"], "song2");
    assert_eq!(songs[0]["data"]["releaseDate"], "11.11.2011");
}

#[tokio::test]
async fn test_get_songs_requires_numeric_window() {
    let repo = InMemorySongRepository::new();
    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        "/v1/get/songs?offset=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "failed to parse limit");

    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        "/v1/get/songs?limit=0&offset=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "limit must be >= 1");
}

#[tokio::test]
async fn test_get_song_text_window_and_errors() {
    let stored = song("g", "s", "c0\n\nc1\n\nc2\n\nc3");
    let repo = InMemorySongRepository::new().with_songs(vec![stored.clone()]);
    let uri = |q: &str| format!("/v1/get/songs/{}?{}", stored.song_id, q);

    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        &uri("limit=1&offset=2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "c2" }));

    let (status, _) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        &uri("limit=3&offset=2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        &format!("/v1/get/songs/{}?limit=1&offset=0", Uuid::now_v7()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "song not found");

    let (status, _) = send(
        app(&repo, MockSongDataClient::new()),
        Method::GET,
        "/v1/get/songs/not-a-uuid?limit=1&offset=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_song_returns_created_song() {
    let repo = InMemorySongRepository::new();
    let data = SongData {
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16),
        text: "verse".to_string(),
        link: "https://example.com".to_string(),
    };
    let client = MockSongDataClient::new().with_response("Muse", "Supermassive Black Hole", data);

    let (status, body) = send(
        app(&repo, client),
        Method::POST,
        "/v1/new/song",
        Some(json!({ "group": "Muse", "song": "Supermassive Black Hole" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["group"], "Muse");
    assert_eq!(body["data"]["releaseDate"], "16.07.2006");
    let id = Uuid::parse_str(body["songID"].as_str().unwrap()).unwrap();
    assert!(repo.get(id).await.is_some());
}

#[tokio::test]
async fn test_create_song_rejected_by_song_data_api() {
    let repo = InMemorySongRepository::new();
    let client = MockSongDataClient::new().with_rejection("g", "s");

    let (status, body) = send(
        app(&repo, client),
        Method::POST,
        "/v1/new/song",
        Some(json!({ "group": "g", "song": "s" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "api request failed");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_song_malformed_body_is_bad_request() {
    let repo = InMemorySongRepository::new();
    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::POST,
        "/v1/new/song",
        Some(json!({ "group": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_internal_errors_are_generic() {
    let repo = InMemorySongRepository::new().with_failing_writes();
    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::POST,
        "/v1/new/song",
        Some(json!({ "group": "g", "song": "s" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn test_edit_and_delete() {
    let stored = song("g", "s", "old");
    let repo = InMemorySongRepository::new().with_songs(vec![stored.clone()]);

    let mut edited = serde_json::to_value(&stored).unwrap();
    edited["data"]["text"] = json!("new");
    let (status, body) = send(
        app(&repo, MockSongDataClient::new()),
        Method::PUT,
        "/v1/edit/",
        Some(edited),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(repo.get(stored.song_id).await.unwrap().data.text, "new");

    let (status, _) = send(
        app(&repo, MockSongDataClient::new()),
        Method::DELETE,
        &format!("/v1/del/{}", stored.song_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(repo.is_empty().await);

    // Unknown id is a successful no-op.
    let (status, _) = send(
        app(&repo, MockSongDataClient::new()),
        Method::DELETE,
        &format!("/v1/del/{}", Uuid::now_v7()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_edit_accepts_rfc3339_release_date() {
    let stored = song("g", "s", "old");
    let repo = InMemorySongRepository::new().with_songs(vec![stored.clone()]);

    let mut edited = serde_json::to_value(&stored).unwrap();
    edited["data"]["releaseDate"] = json!("2006-07-16T00:00:00Z");
    let (status, _) = send(
        app(&repo, MockSongDataClient::new()),
        Method::PUT,
        "/v1/edit/",
        Some(edited),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        repo.get(stored.song_id).await.unwrap().data.release_date,
        NaiveDate::from_ymd_opt(2006, 7, 16)
    );
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (status, body) = send(
        app(&InMemorySongRepository::new(), MockSongDataClient::new()),
        Method::GET,
        "/v1/openapi.json",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v1/new/song"].is_object());
    assert!(body["paths"]["/v1/get/songs/{id}"].is_object());
}
