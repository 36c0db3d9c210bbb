use std::path::PathBuf;

use chrono::Utc;

use crate::{config, spotify, types::Token};

/// Refresh this many seconds before the access token actually expires.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the persisted OAuth token and keeps the access token fresh.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token that is valid for at least a few more minutes,
    /// refreshing and persisting it first if needed.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let mut refreshed = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            // Spotify only sometimes rotates the refresh token.
            if refreshed.refresh_token.is_empty() {
                refreshed.refresh_token = self.token.refresh_token.clone();
            }
            self.token = refreshed;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        is_expired_at(&self.token, now)
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }
}

fn is_expired_at(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            scope: config::DEFAULT_SCOPE.to_string(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn fresh_token_is_not_expired() {
        assert!(!is_expired_at(&token(1_000, 3_600), 1_000));
        assert!(!is_expired_at(&token(1_000, 3_600), 1_000 + 3_600 - 241));
    }

    #[test]
    fn token_inside_margin_is_expired() {
        assert!(is_expired_at(&token(1_000, 3_600), 1_000 + 3_600 - 240));
        assert!(is_expired_at(&token(1_000, 3_600), 10_000));
    }

    #[test]
    fn short_lived_token_does_not_underflow() {
        assert!(is_expired_at(&token(1_000, 60), 1_000));
    }
}
