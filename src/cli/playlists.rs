use tabled::Table;

use crate::{actions, error, info, types::PlaylistTableRow};

use super::{connect, spinner};

pub async fn playlists(radio_only: bool) {
    let (client, user) = connect().await;

    let pb = spinner("Fetching playlists...");
    let result = actions::list_user_playlists(&client, &user.id).await;
    pb.finish_and_clear();

    let mut playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to list playlists: {}", e),
    };

    if radio_only {
        playlists.retain(|p| p.name == actions::PLAYLIST_NAME);
    }

    if playlists.is_empty() {
        info!("No playlists found.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            radio: if p.name == actions::PLAYLIST_NAME {
                "yes".to_string()
            } else {
                String::new()
            },
            name: p.name,
            id: p.id,
        })
        .collect();

    println!("{}", Table::new(rows));
}
