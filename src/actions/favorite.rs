use serde::Serialize;

use crate::spotify::{ApiError, RemoteMusicClient};

use super::current_track_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FavoriteOutcome {
    NothingPlaying,
    AlreadySaved { track_id: String },
    Saved { track_id: String },
}

/// Adds the current track to the user's saved tracks unless it is already
/// there. Repeating it for the same track only re-checks membership.
pub async fn favorite_song<C>(client: &C) -> Result<FavoriteOutcome, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let Some(track_id) = current_track_id(client).await? else {
        return Ok(FavoriteOutcome::NothingPlaying);
    };

    let ids = std::slice::from_ref(&track_id);

    let saved = client.saved_tracks_contains(ids).await?;
    if saved.first().copied().unwrap_or(false) {
        return Ok(FavoriteOutcome::AlreadySaved { track_id });
    }

    client.add_saved_tracks(ids).await?;
    Ok(FavoriteOutcome::Saved { track_id })
}
