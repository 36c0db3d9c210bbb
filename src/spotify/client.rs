use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    types::{
        CreatePlaylistRequest, CurrentUser, CurrentlyPlayingResponse, ErrorResponse, Page,
        Playlist, Recommendations, ReplacePlaylistItemsRequest, SaveTracksRequest,
        StartPlaybackRequest, Track,
    },
    utils,
};

use super::{ApiError, RemoteMusicClient};

/// [`RemoteMusicClient`] backed by the Spotify Web API.
///
/// Holds the token manager behind a mutex so concurrent callers share one
/// refresh; the requests themselves are not serialized.
pub struct SpotifyClient {
    http: Client,
    api_url: Url,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Builds a client for `api_url` (e.g. `https://api.spotify.com/v1`).
    pub fn new(tokens: TokenManager, api_url: &str) -> Res<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as API base URL", api_url).into());
        }

        Ok(Self {
            http: Client::new(),
            api_url,
            tokens: Mutex::new(tokens),
        })
    }

    /// Builds a client from the cached token and the configured API URL.
    pub async fn from_cache() -> Res<Self> {
        let tokens = TokenManager::load().await.map_err(|e| {
            format!(
                "Failed to load token. Please run spotify-additions auth\n Error: {}",
                e
            )
        })?;
        Self::new(tokens, &config::spotify_apiurl())
    }

    /// Resolves the user the access token belongs to.
    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let req = self.request(Method::GET, &["me"]).await?;
        json(send(req).await?).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let token = self
            .tokens
            .lock()
            .await
            .get_valid_token()
            .await
            .map_err(ApiError::Auth)?;

        Ok(self
            .http
            .request(method, self.endpoint(segments))
            .bearer_auth(token))
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let response = req.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.error.message,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body,
    };

    Err(ApiError::Status { status, message })
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await?;
    decode(&body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl RemoteMusicClient for SpotifyClient {
    async fn currently_playing_track(&self) -> Result<Option<Track>, ApiError> {
        let req = self
            .request(Method::GET, &["me", "player", "currently-playing"])
            .await?;
        let response = send(req).await?;

        // 204 means no active playback
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }

        let playing: CurrentlyPlayingResponse = decode(&body)?;

        Ok(playing.item.and_then(|item| {
            item.id.map(|id| Track {
                id,
                name: item.name,
                uri: item.uri,
            })
        }))
    }

    async fn user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Playlist>, ApiError> {
        let req = self
            .request(Method::GET, &["users", user_id, "playlists"])
            .await?
            .query(&[("offset", offset), ("limit", limit)]);
        json(send(req).await?).await
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), ApiError> {
        let req = self
            .request(Method::DELETE, &["playlists", playlist_id, "followers"])
            .await?;
        send(req).await?;
        Ok(())
    }

    async fn recommendations(
        &self,
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Recommendations, ApiError> {
        let req = self
            .request(Method::GET, &["recommendations"])
            .await?
            .query(&[
                ("seed_tracks", seed_tracks.join(",")),
                ("limit", limit.to_string()),
            ]);
        json(send(req).await?).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<Playlist, ApiError> {
        let req = self
            .request(Method::POST, &["users", user_id, "playlists"])
            .await?
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
                public,
            });
        json(send(req).await?).await
    }

    async fn replace_playlist_items(
        &self,
        playlist_uri: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError> {
        let playlist_id = utils::playlist_id(playlist_uri);
        let req = self
            .request(Method::PUT, &["playlists", playlist_id, "tracks"])
            .await?
            .json(&ReplacePlaylistItemsRequest {
                uris: track_ids.iter().map(|id| utils::track_uri(id)).collect(),
            });
        send(req).await?;
        Ok(())
    }

    async fn start_playback(&self, context_uri: &str) -> Result<(), ApiError> {
        let req = self
            .request(Method::PUT, &["me", "player", "play"])
            .await?
            .json(&StartPlaybackRequest {
                context_uri: context_uri.to_string(),
            });
        send(req).await?;
        Ok(())
    }

    async fn saved_tracks_contains(&self, track_ids: &[String]) -> Result<Vec<bool>, ApiError> {
        let req = self
            .request(Method::GET, &["me", "tracks", "contains"])
            .await?
            .query(&[("ids", track_ids.join(","))]);
        json(send(req).await?).await
    }

    async fn add_saved_tracks(&self, track_ids: &[String]) -> Result<(), ApiError> {
        let req = self
            .request(Method::PUT, &["me", "tracks"])
            .await?
            .json(&SaveTracksRequest {
                ids: track_ids.to_vec(),
            });
        send(req).await?;
        Ok(())
    }
}
