use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::{Value, json};
use spotify_additions::{
    config,
    management::TokenManager,
    spotify::{ApiError, RemoteMusicClient, SpotifyClient},
    types::Token,
};
use tokio::net::TcpListener;

// (path, authorization header, JSON body) of each request the fake API saw.
type Requests = Arc<Mutex<Vec<(String, String, Value)>>>;

fn token() -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: config::DEFAULT_SCOPE.to_string(),
        expires_in: 3_600,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    }
}

/// Serves `app` on an ephemeral port and points a client at its `/v1` root.
async fn client_for(app: Router) -> SpotifyClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    SpotifyClient::new(TokenManager::new(token()), &format!("http://{}/v1", addr)).unwrap()
}

fn playing(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/v1/me/player/currently-playing",
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    )
}

#[tokio::test]
async fn test_no_content_means_nothing_playing() {
    let client = client_for(playing(StatusCode::NO_CONTENT, "")).await;
    assert!(client.currently_playing_track().await.unwrap().is_none());
}

#[tokio::test]
async fn test_local_file_without_id_means_nothing_playing() {
    let body = r#"{"is_playing":true,"item":{"id":null,"name":"Local file","uri":"spotify:local:a:b:c:1"}}"#;
    let client = client_for(playing(StatusCode::OK, body)).await;
    assert!(client.currently_playing_track().await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_item_means_nothing_playing() {
    let client = client_for(playing(StatusCode::OK, r#"{"is_playing":false,"item":null}"#)).await;
    assert!(client.currently_playing_track().await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_track_is_decoded() {
    let body = r#"{"item":{"id":"T1","name":"Song","uri":"spotify:track:T1"}}"#;
    let client = client_for(playing(StatusCode::OK, body)).await;

    let track = client.currently_playing_track().await.unwrap().unwrap();
    assert_eq!(track.id, "T1");
    assert_eq!(track.uri, "spotify:track:T1");
}

#[tokio::test]
async fn test_error_message_comes_from_error_body() {
    let app = Router::new().route(
        "/v1/me/player/play",
        put(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": { "status": 404, "message": "No active device" } })),
            )
        }),
    );
    let client = client_for(app).await;

    let err = client
        .start_playback("spotify:playlist:PL9")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    match err {
        ApiError::Status { message, .. } => assert_eq!(message, "No active device"),
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_body_uses_reason_phrase() {
    let app = Router::new().route(
        "/v1/me/player/play",
        put(|| async { StatusCode::FORBIDDEN }),
    );
    let client = client_for(app).await;

    match client.start_playback("spotify:playlist:PL9").await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, reqwest::StatusCode::FORBIDDEN);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_replace_items_puts_track_uris_to_playlist() {
    let requests: Requests = Arc::default();
    let recorded = Arc::clone(&requests);
    let app = Router::new().route(
        "/v1/playlists/{id}/tracks",
        put(
            move |Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
                let recorded = Arc::clone(&recorded);
                async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    recorded
                        .lock()
                        .unwrap()
                        .push((format!("/v1/playlists/{}/tracks", id), auth, body));
                    (StatusCode::CREATED, Json(json!({ "snapshot_id": "s1" })))
                }
            },
        ),
    );
    let client = client_for(app).await;

    client
        .replace_playlist_items(
            "spotify:playlist:PL9",
            &["R1".to_string(), "R2".to_string()],
        )
        .await
        .unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (path, auth, body) = &requests[0];
    assert_eq!(path, "/v1/playlists/PL9/tracks");
    assert_eq!(auth, "Bearer access");
    assert_eq!(
        body,
        &json!({ "uris": ["spotify:track:R1", "spotify:track:R2"] })
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let app = Router::new().route(
        "/v1/recommendations",
        get(|| async { ([(header::CONTENT_TYPE, "application/json")], "{\"tracks\": [") }),
    );
    let client = client_for(app).await;

    let err = client
        .recommendations(&["T1".to_string()], 100)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_saved_tracks_contains_reads_flags() {
    let app = Router::new().route(
        "/v1/me/tracks/contains",
        get(|| async { Json(json!([false])).into_response() }),
    );
    let client = client_for(app).await;

    let saved = client
        .saved_tracks_contains(&["T1".to_string()])
        .await
        .unwrap();
    assert_eq!(saved, vec![false]);
}
