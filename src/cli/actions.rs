use crate::{
    actions::{self, Action, ActionOutcome, FavoriteOutcome, RadioOutcome},
    error, info, success,
};

use super::{connect, spinner};

pub async fn create_song_radio() {
    run_action(Action::CreateSongRadio).await
}

pub async fn favorite_song() {
    run_action(Action::FavoriteSong).await
}

pub async fn run_action(action: Action) {
    let (client, user) = connect().await;

    let pb = spinner(match action {
        Action::CreateSongRadio => "Building song radio...",
        Action::FavoriteSong => "Saving current track...",
    });
    let result = actions::run(action, &client, &user).await;
    pb.finish_and_clear();

    match result {
        Ok(outcome) => report(outcome),
        Err(e) => error!("{} failed: {}", action, e),
    }
}

fn report(outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Radio(RadioOutcome::NothingPlaying)
        | ActionOutcome::Favorite(FavoriteOutcome::NothingPlaying) => {
            info!("Nothing is playing right now.")
        }
        ActionOutcome::Radio(RadioOutcome::Started {
            seed_track_id,
            playlist_uri,
            track_count,
        }) => success!(
            "Playing \"{}\" ({}) with {} tracks seeded from {}",
            actions::PLAYLIST_NAME,
            playlist_uri,
            track_count,
            seed_track_id
        ),
        ActionOutcome::Favorite(FavoriteOutcome::AlreadySaved { track_id }) => {
            info!("Track {} is already saved.", track_id)
        }
        ActionOutcome::Favorite(FavoriteOutcome::Saved { track_id }) => {
            success!("Track {} saved.", track_id)
        }
    }
}
