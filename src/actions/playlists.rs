use crate::{
    spotify::{ApiError, RemoteMusicClient},
    types::Playlist,
};

pub const PAGE_SIZE: u32 = 50;

/// Fetches every playlist of `user_id`, in listing order.
///
/// Requests pages of [`PAGE_SIZE`] at increasing offsets until the offset
/// reaches the `total` reported by the latest page. The first page is always
/// requested, even for a user without playlists. Items are concatenated as
/// returned; if the total changes while paging, so does the result.
pub async fn list_user_playlists<C>(client: &C, user_id: &str) -> Result<Vec<Playlist>, ApiError>
where
    C: RemoteMusicClient + ?Sized,
{
    let mut offset = 0;
    let mut playlists = Vec::new();

    loop {
        let page = client.user_playlists(user_id, offset, PAGE_SIZE).await?;
        playlists.extend(page.items);

        offset += PAGE_SIZE;
        if offset >= page.total {
            break;
        }
    }

    Ok(playlists)
}
