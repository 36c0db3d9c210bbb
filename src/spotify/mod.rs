//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here: the OAuth PKCE flow, the
//! [`RemoteMusicClient`] trait the actions are written against, and
//! [`SpotifyClient`], its implementation on top of the Web API.
//!
//! ```text
//! actions (song radio, favorite)
//!          ↓
//! RemoteMusicClient
//!          ↓
//! SpotifyClient ── TokenManager (refresh, persistence)
//!          ↓
//! reqwest → Spotify Web API
//! ```
//!
//! ## Endpoints used
//!
//! - `GET /me` - current user
//! - `GET /me/player/currently-playing` - seed for both actions
//! - `GET /users/{user_id}/playlists` - paginated playlist listing
//! - `DELETE /playlists/{playlist_id}/followers` - remove the previous radio
//! - `GET /recommendations` - tracks for the new radio
//! - `POST /users/{user_id}/playlists` - create the radio
//! - `PUT /playlists/{playlist_id}/tracks` - fill the radio in one request
//! - `PUT /me/player/play` - start playback of the radio
//! - `GET /me/tracks/contains`, `PUT /me/tracks` - saved tracks
//!
//! ## Errors
//!
//! Every call returns [`ApiError`]. Nothing in this module retries: rate
//! limiting and gateway errors are reported to the caller like any other
//! failure.

pub mod auth;
mod client;
mod error;

use async_trait::async_trait;

use crate::types::{Page, Playlist, Recommendations, Track};

pub use client::SpotifyClient;
pub use error::ApiError;

/// The slice of the Spotify Web API the actions rely on.
///
/// Implemented by [`SpotifyClient`] for real use; tests substitute the
/// generated `MockRemoteMusicClient`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteMusicClient: Send + Sync {
    /// The track currently playing, or `None` when nothing (or no track) is.
    async fn currently_playing_track(&self) -> Result<Option<Track>, ApiError>;

    async fn user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Playlist>, ApiError>;

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), ApiError>;

    async fn recommendations(
        &self,
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Recommendations, ApiError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<Playlist, ApiError>;

    /// Replaces the whole content of the playlist with `track_ids`, in order.
    async fn replace_playlist_items(
        &self,
        playlist_uri: &str,
        track_ids: &[String],
    ) -> Result<(), ApiError>;

    async fn start_playback(&self, context_uri: &str) -> Result<(), ApiError>;

    /// One flag per id, in the order given.
    async fn saved_tracks_contains(&self, track_ids: &[String]) -> Result<Vec<bool>, ApiError>;

    async fn add_saved_tracks(&self, track_ids: &[String]) -> Result<(), ApiError>;
}
