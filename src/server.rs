use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{Res, api, config, info, types::PkceToken};

/// Serves `/callback` (and `/health`) until the task is aborted.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    serve(app).await
}

/// Serves the action endpoints until the process is stopped.
pub async fn start_action_server(state: Arc<api::ActionState>) -> Res<()> {
    let app = action_router(state);
    serve(app).await
}

pub fn action_router(state: Arc<api::ActionState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/actions/{action}", post(api::action).layer(Extension(state)))
}

async fn serve(app: Router) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
