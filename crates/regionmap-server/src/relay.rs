//! WebSocket broadcast relay
//!
//! Forwards every text or binary message from one peer to all other
//! connected peers, never back to the sender. There is no application
//! handshake; the relay does not inspect payloads. A peer that fails or
//! disconnects mid-broadcast is dropped from the registry without
//! interrupting delivery to the rest.
//!
//! Each connection gets a forwarding task draining an unbounded channel
//! into its sink, so a slow peer never blocks a broadcast. The registry
//! holds only the channel senders; the mutex is never held across an
//! await point.

use crate::error::ServerResult;
use futures_util::{SinkExt, StreamExt};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;

/// Connected peers, keyed by connection id
pub type Registry = Mutex<HashMap<u64, UnboundedSender<Message>>>;

/// Create an empty peer registry
pub fn new_registry() -> Arc<Registry> {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Serve one relay peer on an established byte stream.
///
/// Performs the WebSocket server handshake, registers the peer, forwards
/// its messages to everyone else, and deregisters on disconnect.
pub async fn handle_peer<S>(stream: S, peer: u64, registry: Arc<Registry>) -> ServerResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut source) = ws.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let connected = {
        let mut peers = registry.lock().unwrap();
        peers.insert(peer, tx);
        peers.len()
    };
    info!("[WS] +peer {} ({} connected)", peer, connected);

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = source.next().await {
        let message = match message {
            Ok(message) => message,
            Err(_) => break,
        };
        if message.is_close() {
            break;
        }
        if !message.is_text() && !message.is_binary() {
            continue;
        }
        let peers = registry.lock().unwrap();
        for (&id, sender) in peers.iter() {
            if id != peer {
                // a closed channel means the peer is already on its way out
                let _ = sender.send(message.clone());
            }
        }
    }

    let connected = {
        let mut peers = registry.lock().unwrap();
        peers.remove(&peer);
        peers.len()
    };
    writer.abort();
    info!("[WS] -peer {} ({} connected)", peer, connected);
    Ok(())
}

/// Accept loop for the relay. Runs until the listener fails.
pub async fn serve(port: u16) -> ServerResult<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Relay listening on ws://0.0.0.0:{}", port);

    let registry = new_registry();
    let mut next_peer: u64 = 0;
    loop {
        let (stream, addr) = listener.accept().await?;
        let peer = next_peer;
        next_peer += 1;
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            if let Err(e) = handle_peer(stream, peer, registry).await {
                warn!("[WS] peer {} ({}) failed: {}", peer, addr, e);
            }
        });
    }
}
