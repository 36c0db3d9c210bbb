//! # CLI Module
//!
//! Command implementations behind `main.rs`. Each command resolves exactly one
//! authenticated [`SpotifyClient`] and the [`CurrentUser`] it belongs to, then
//! hands both to the action layer; nothing below this module looks them up on
//! its own.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth 2.0 PKCE authorization, stores the token locally
//! - [`create_song_radio`] - build and play the song radio
//! - [`favorite_song`] - save the current track
//! - [`run_action`] - run an action by its host name
//! - [`playlists`] - list the user's playlists, marking song radios
//! - [`serve`] - expose the actions over HTTP for a home-automation host
//!
//! ```bash
//! spotify-additions auth
//! spotify-additions create-song-radio
//! spotify-additions run favorite_song
//! spotify-additions serve
//! ```
//!
//! Failures are printed with the console macros; unrecoverable ones exit with
//! status 1.

mod actions;
mod auth;
mod playlists;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, spotify::SpotifyClient, types::CurrentUser};

pub use actions::{create_song_radio, favorite_song, run_action};
pub use auth::auth;
pub use playlists::playlists;
pub use serve::serve;

async fn connect() -> (SpotifyClient, CurrentUser) {
    let client = match SpotifyClient::from_cache().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    let user = match client.current_user().await {
        Ok(user) => user,
        Err(e) => error!("Failed to resolve current user: {}", e),
    };

    (client, user)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
