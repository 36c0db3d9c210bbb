//! # Actions
//!
//! The two player actions a home-automation host can trigger:
//!
//! - `create_song_radio` ([`create_song_radio`]) - replaces the
//!   "Home Assistant Song Radio" playlist with recommendations seeded from the
//!   current track and starts playing it
//! - `favorite_song` ([`favorite_song`]) - adds the current track to the saved
//!   tracks unless it is already there
//!
//! Both are plain sequences of calls on a [`RemoteMusicClient`] handed in by
//! the invoker together with the [`CurrentUser`]. When nothing is playing they
//! return early without touching anything else. Remote failures are returned
//! unchanged; there is no retry and no rollback. Concurrent runs are not
//! coordinated with each other.

mod favorite;
pub mod playlists;
mod song_radio;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    spotify::{ApiError, RemoteMusicClient},
    types::CurrentUser,
};

pub use favorite::{FavoriteOutcome, favorite_song};
pub use playlists::list_user_playlists;
pub use song_radio::{
    PLAYLIST_NAME, RECOMMENDATION_LIMIT, RadioOutcome, create_playlist, create_song_radio,
    delete_existing_playlist, recommended_track_ids,
};

/// An action as named by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateSongRadio,
    FavoriteSong,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::CreateSongRadio, Action::FavoriteSong];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateSongRadio => "create_song_radio",
            Action::FavoriteSong => "favorite_song",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown action '{}', expected one of: {}",
                    s,
                    Action::ALL.map(|a| a.as_str()).join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Radio(RadioOutcome),
    Favorite(FavoriteOutcome),
}

/// Runs `action` against `client` on behalf of `user`.
pub async fn run<C>(
    action: Action,
    client: &C,
    user: &CurrentUser,
) -> Result<ActionOutcome, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    match action {
        Action::CreateSongRadio => create_song_radio(client, user)
            .await
            .map(ActionOutcome::Radio),
        Action::FavoriteSong => favorite_song(client).await.map(ActionOutcome::Favorite),
    }
}

/// Id of the track currently playing, if any.
pub(crate) async fn current_track_id<C>(client: &C) -> Result<Option<String>, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    Ok(client.currently_playing_track().await?.map(|track| track.id))
}
