use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    server::start_callback_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the browser to hit the OAuth callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE authorization flow and persists the resulting token.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server on `SERVER_ADDRESS`
/// 3. Opens the authorization URL in the default browser
/// 4. Waits up to 60 seconds for `/callback` to exchange the code
/// 5. Saves the token through [`TokenManager`]
///
/// # Errors
///
/// Fails when the client ID or redirect URI is not configured, when the
/// callback doesn't arrive in time, or when the token cannot be written.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri()?,
        &code_challenge,
        &config::spotify_scope(),
    )?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    let Some(token) = token else {
        return Err("Authentication failed or timed out.".into());
    };

    TokenManager::new(token)
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    Ok(())
}

/// Authorization endpoint URL for the PKCE flow, with every parameter
/// percent-encoded.
pub fn authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Res<Url> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )?;
    Ok(url)
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Trades a refresh token for a new access token.
///
/// The returned token has an empty `refresh_token` when Spotify didn't rotate
/// it; callers keep the old one in that case.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &client_id),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
        return Err(format!(
            "Token refresh rejected with {}. Please run spotify-additions auth",
            res.status()
        ));
    }

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(into_token(json))
}

/// Completes the authorization code grant with the PKCE verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", &client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &redirect_uri),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = res.json().await?;
    Ok(into_token(json))
}

fn into_token(res: TokenResponse) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res.refresh_token.unwrap_or_default(),
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn authorize_url_encodes_every_parameter() {
        let url = authorize_url(
            "https://accounts.spotify.com/authorize",
            "client",
            "http://127.0.0.1:8888/callback?from=cli&x=1",
            "challenge",
            "user-library-read user-library-modify",
        )
        .unwrap();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert!(!url.as_str().contains("?from=cli&x=1"));

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params["redirect_uri"],
            "http://127.0.0.1:8888/callback?from=cli&x=1"
        );
        assert_eq!(params["scope"], "user-library-read user-library-modify");
        assert_eq!(params["code_challenge_method"], "S256");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn authorize_url_rejects_invalid_endpoint() {
        assert!(authorize_url("not a url", "client", "http://x/cb", "c", "s").is_err());
    }
}
