use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use atrium_model::{EntryCreated, SocketFrame};

use crate::infra::app_state::AppState;

/// Upgrade to a WebSocket that streams `entry_created` frames.
pub async fn events_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Viewers only listen; inbound frames other than close are ignored.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut subscription = state.fanout.subscribe();
    let subscriber_id = subscription.id();
    info!(
        subscriber = %subscriber_id,
        subscribers = state.fanout.subscriber_count(),
        "client connected"
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            let Some(message) = encode_frame(event) else {
                continue;
            };
            if ws_sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "websocket receive error");
                    break;
                }
            }
        }
    });

    // Whichever side finishes first ends the connection.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.fanout.unsubscribe(subscriber_id);
    info!(
        subscriber = %subscriber_id,
        subscribers = state.fanout.subscriber_count(),
        "client disconnected"
    );
}

fn encode_frame(event: EntryCreated) -> Option<Message> {
    match serde_json::to_string(&SocketFrame::EntryCreated(event)) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!(error = %e, "failed to encode socket frame");
            None
        }
    }
}
