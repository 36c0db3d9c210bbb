use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use spotify_additions::{
    api::ActionState,
    server::action_router,
    spotify::{ApiError, RemoteMusicClient},
    types::{CurrentUser, Page, Playlist, Recommendations, Track},
};
use tower::ServiceExt;

// Plays "T1", which is not saved yet; records every write.
#[derive(Default)]
struct FakeClient {
    writes: Mutex<Vec<String>>,
    fail_playing: bool,
}

fn unexpected(call: &str) -> ApiError {
    ApiError::Auth(format!("unexpected call: {}", call))
}

#[async_trait]
impl RemoteMusicClient for FakeClient {
    async fn currently_playing_track(&self) -> Result<Option<Track>, ApiError> {
        if self.fail_playing {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                message: "The access token expired".to_string(),
            });
        }

        Ok(Some(Track {
            id: "T1".to_string(),
            name: "Song".to_string(),
            uri: "spotify:track:T1".to_string(),
        }))
    }

    async fn user_playlists(&self, _: &str, _: u32, _: u32) -> Result<Page<Playlist>, ApiError> {
        Err(unexpected("user_playlists"))
    }

    async fn unfollow_playlist(&self, _: &str) -> Result<(), ApiError> {
        Err(unexpected("unfollow_playlist"))
    }

    async fn recommendations(&self, _: &[String], _: u32) -> Result<Recommendations, ApiError> {
        Err(unexpected("recommendations"))
    }

    async fn create_playlist(&self, _: &str, _: &str, _: bool) -> Result<Playlist, ApiError> {
        Err(unexpected("create_playlist"))
    }

    async fn replace_playlist_items(&self, _: &str, _: &[String]) -> Result<(), ApiError> {
        Err(unexpected("replace_playlist_items"))
    }

    async fn start_playback(&self, _: &str) -> Result<(), ApiError> {
        Err(unexpected("start_playback"))
    }

    async fn saved_tracks_contains(&self, track_ids: &[String]) -> Result<Vec<bool>, ApiError> {
        Ok(vec![false; track_ids.len()])
    }

    async fn add_saved_tracks(&self, track_ids: &[String]) -> Result<(), ApiError> {
        self.writes
            .lock()
            .unwrap()
            .push(format!("add_saved_tracks {}", track_ids.join(",")));
        Ok(())
    }
}

fn state(client: Arc<FakeClient>) -> Arc<ActionState> {
    Arc::new(ActionState {
        client,
        user: CurrentUser {
            id: "listener".to_string(),
            display_name: None,
        },
    })
}

async fn post(client: Arc<FakeClient>, uri: &str) -> (StatusCode, Value) {
    let response = action_router(state(client))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_favorite_song_endpoint_saves_track() {
    let client = Arc::new(FakeClient::default());

    let (status, body) = post(Arc::clone(&client), "/actions/favorite_song").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "favorite_song");
    assert_eq!(body["outcome"]["status"], "saved");
    assert_eq!(body["outcome"]["track_id"], "T1");
    assert_eq!(*client.writes.lock().unwrap(), ["add_saved_tracks T1"]);
}

#[tokio::test]
async fn test_unknown_action_is_not_found() {
    let client = Arc::new(FakeClient::default());

    let (status, body) = post(Arc::clone(&client), "/actions/shuffle").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("favorite_song"));
    assert!(client.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_remote_failure_is_bad_gateway() {
    let client = Arc::new(FakeClient {
        fail_playing: true,
        ..Default::default()
    });

    let (status, body) = post(Arc::clone(&client), "/actions/create_song_radio").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("The access token expired")
    );
    assert!(client.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_lists_actions() {
    let response = action_router(state(Arc::new(FakeClient::default())))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["actions"],
        serde_json::json!(["create_song_radio", "favorite_song"])
    );
}
