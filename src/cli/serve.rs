use std::sync::Arc;

use crate::{api::ActionState, error, server};

use super::connect;

pub async fn serve() {
    let (client, user) = connect().await;

    let state = Arc::new(ActionState {
        client: Arc::new(client),
        user,
    });

    if let Err(e) = server::start_action_server(state).await {
        error!("Action server stopped: {}", e);
    }
}
