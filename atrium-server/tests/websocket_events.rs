use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use atrium_core::{
    UploadFile, UploadSubmission, api::routes::v1,
    database::InMemoryCatalogRepository, storage::MemoryBlobStore,
};
use atrium_model::SocketFrame;
use atrium_server::{AppState, create_app, infra::config::Config};

async fn spawn_server() -> Result<(AppState, String)> {
    let state = AppState::new(
        Config::default(),
        Arc::new(MemoryBlobStore::new()),
        Arc::new(InMemoryCatalogRepository::new()),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = create_app(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok((state, format!("ws://{addr}{}", v1::events::STREAM)))
}

async fn wait_for_subscribers(state: &AppState, expected: usize) -> Result<()> {
    timeout(Duration::from_secs(5), async {
        while state.fanout.subscriber_count() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .map_err(|_| anyhow!("subscriber count never reached {expected}"))
}

fn submission(description: &str) -> UploadSubmission {
    UploadSubmission {
        file: Some(UploadFile {
            file_name: Some("pic.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: b"png".to_vec(),
        }),
        description: Some(description.to_string()),
        category: Some("Villas".to_string()),
    }
}

#[tokio::test]
async fn connected_viewer_receives_entry_created_frame() -> Result<()> {
    let (state, url) = spawn_server().await?;
    let (mut socket, _) = connect_async(url.as_str()).await?;
    wait_for_subscribers(&state, 1).await?;

    let entry = state.ingest.ingest(submission("Garden villa")).await?;

    let message = timeout(Duration::from_secs(5), socket.next())
        .await?
        .ok_or_else(|| anyhow!("socket closed before any frame"))??;
    let text = match message {
        Message::Text(text) => text,
        other => return Err(anyhow!("expected a text frame, got {other:?}")),
    };

    let frame: SocketFrame = serde_json::from_str(text.as_str())?;
    let SocketFrame::EntryCreated(event) = frame;
    assert_eq!(event.id, Some(entry.id));
    assert_eq!(event.media_ref, entry.media_ref);
    assert_eq!(event.description, "Garden villa");
    assert_eq!(event.category.as_deref(), Some("Villas"));
    Ok(())
}

#[tokio::test]
async fn closing_the_socket_unsubscribes_the_viewer() -> Result<()> {
    let (state, url) = spawn_server().await?;
    let (mut socket, _) = connect_async(url.as_str()).await?;
    wait_for_subscribers(&state, 1).await?;

    socket.send(Message::Close(None)).await?;
    wait_for_subscribers(&state, 0).await?;

    // Publishing with nobody listening still succeeds.
    state.ingest.ingest(submission("After close")).await?;
    Ok(())
}

#[tokio::test]
async fn late_viewer_does_not_receive_earlier_events() -> Result<()> {
    let (state, url) = spawn_server().await?;
    state.ingest.ingest(submission("Before connect")).await?;

    let (mut socket, _) = connect_async(url.as_str()).await?;
    wait_for_subscribers(&state, 1).await?;

    let next = timeout(Duration::from_millis(200), socket.next()).await;
    assert!(next.is_err(), "no replay expected, got {next:?}");
    Ok(())
}
