//! Decoding of socket frames and a live feed of catalog events.

use futures_util::StreamExt;
use log::{debug, info};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

use atrium_model::{EntryCreated, SocketFrame};

use crate::error::ClientError;

/// Decode one text frame from the event stream.
pub fn decode_socket_frame(text: &str) -> Result<EntryCreated, ClientError> {
    match serde_json::from_str::<SocketFrame>(text)? {
        SocketFrame::EntryCreated(event) => Ok(event),
    }
}

/// Open connection to the server's event stream.
#[derive(Debug)]
pub struct EventFeed {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl EventFeed {
    /// Open the stream at `url`, e.g. [`ApiClient::events_url`](crate::ApiClient::events_url).
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (socket, _) = connect_async(url).await?;
        info!("[EventFeed] connected to {}", url);
        Ok(Self { socket })
    }

    /// Next catalog event. `None` once the server closes the stream.
    ///
    /// Frames that fail to decode are skipped so one bad frame does not end
    /// the feed.
    pub async fn next_event(&mut self) -> Option<Result<EntryCreated, ClientError>> {
        while let Some(message) = self.socket.next().await {
            match message {
                Ok(Message::Text(text)) => match decode_socket_frame(text.as_str()) {
                    Ok(event) => return Some(Ok(event)),
                    Err(err) => {
                        debug!("[EventFeed] skipping undecodable frame: {}", err);
                    }
                },
                Ok(Message::Close(_)) => {
                    info!("[EventFeed] server closed the stream");
                    return None;
                }
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
        }
        None
    }

    /// Send a close frame and drop the connection.
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.socket.close(None).await?;
        Ok(())
    }
}
