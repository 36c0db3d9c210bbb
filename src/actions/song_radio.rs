use serde::Serialize;

use crate::{
    spotify::{ApiError, RemoteMusicClient},
    types::CurrentUser,
};

use super::{current_track_id, playlists::list_user_playlists};

/// Name of the playlist the radio is written to. It identifies the previous
/// radio for deletion as well.
pub const PLAYLIST_NAME: &str = "Home Assistant Song Radio";

pub const RECOMMENDATION_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RadioOutcome {
    NothingPlaying,
    Started {
        seed_track_id: String,
        playlist_uri: String,
        track_count: usize,
    },
}

/// Replaces the song radio playlist with recommendations seeded from the
/// current track and starts playing it.
///
/// Steps run strictly in order and nothing is rolled back: a failure leaves
/// earlier effects (old radio removed, new radio created) in place and is
/// returned unchanged.
pub async fn create_song_radio<C>(client: &C, user: &CurrentUser) -> Result<RadioOutcome, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let Some(seed_track_id) = current_track_id(client).await? else {
        return Ok(RadioOutcome::NothingPlaying);
    };

    delete_existing_playlist(client, user).await?;

    let track_ids = recommended_track_ids(client, &seed_track_id).await?;
    let playlist_uri = create_playlist(client, user, &track_ids).await?;

    client.start_playback(&playlist_uri).await?;

    Ok(RadioOutcome::Started {
        seed_track_id,
        playlist_uri,
        track_count: track_ids.len(),
    })
}

/// Unfollows the previous radio playlist, if there is one.
///
/// Only the last playlist named [`PLAYLIST_NAME`] in listing order is removed;
/// older duplicates stay. Returns the id of the removed playlist.
pub async fn delete_existing_playlist<C>(
    client: &C,
    user: &CurrentUser,
) -> Result<Option<String>, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let playlists = list_user_playlists(client, &user.id).await?;

    let Some(previous) = playlists.into_iter().rev().find(|p| p.name == PLAYLIST_NAME) else {
        return Ok(None);
    };

    client.unfollow_playlist(&previous.id).await?;
    Ok(Some(previous.id))
}

/// Ids of up to 100 tracks recommended for a single seed, in Spotify's order.
pub async fn recommended_track_ids<C>(
    client: &C,
    seed_track_id: &str,
) -> Result<Vec<String>, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let recommendations = client
        .recommendations(&[seed_track_id.to_string()], RECOMMENDATION_LIMIT)
        .await?;

    Ok(recommendations.tracks.into_iter().map(|t| t.id).collect())
}

/// Creates a private [`PLAYLIST_NAME`] playlist holding `track_ids` and returns
/// its URI.
pub async fn create_playlist<C>(
    client: &C,
    user: &CurrentUser,
    track_ids: &[String],
) -> Result<String, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let playlist = client.create_playlist(&user.id, PLAYLIST_NAME, false).await?;
    client.replace_playlist_items(&playlist.uri, track_ids).await?;
    Ok(playlist.uri)
}
