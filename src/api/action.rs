use std::sync::Arc;

use axum::{Extension, extract::Path, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::{
    actions::{self, Action},
    info,
    spotify::RemoteMusicClient,
    types::CurrentUser,
    warning,
};

/// What the action endpoints run against: one client, one user.
pub struct ActionState {
    pub client: Arc<dyn RemoteMusicClient>,
    pub user: CurrentUser,
}

pub async fn action(
    Path(name): Path<String>,
    Extension(state): Extension<Arc<ActionState>>,
) -> (StatusCode, Json<Value>) {
    let action = match name.parse::<Action>() {
        Ok(action) => action,
        Err(e) => return (StatusCode::NOT_FOUND, Json(json!({ "error": e }))),
    };

    match actions::run(action, state.client.as_ref(), &state.user).await {
        Ok(outcome) => {
            info!("{} finished: {:?}", action, outcome);
            (
                StatusCode::OK,
                Json(json!({ "action": action, "outcome": outcome })),
            )
        }
        Err(e) => {
            warning!("{} failed: {}", action, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "action": action, "error": e.to_string() })),
            )
        }
    }
}
