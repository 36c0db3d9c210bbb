use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist id from a `spotify:playlist:<id>` URI or an
/// `open.spotify.com/playlist/<id>` URL. Anything else is taken to be the id.
pub fn playlist_id(playlist: &str) -> &str {
    if let Some(id) = playlist.strip_prefix("spotify:playlist:") {
        return id;
    }

    if let Some((_, rest)) = playlist.split_once("open.spotify.com/playlist/") {
        return rest.split(['?', '/']).next().unwrap_or(rest);
    }

    playlist
}

/// Turns a bare track id into a `spotify:track:<id>` URI; URIs pass through.
pub fn track_uri(track: &str) -> String {
    if track.starts_with("spotify:") {
        track.to_string()
    } else {
        format!("spotify:track:{}", track)
    }
}
