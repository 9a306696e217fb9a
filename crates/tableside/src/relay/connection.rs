//! # Connection Lifecycle
//!
//! `GET /ws/{role}/{identity}?token=...` upgrades to a WebSocket and runs one task per
//! channel through `Connecting -> Open -> Closed`.
//!
//! Admin channels are checked against the handshake before the upgrade, so a rejected
//! attempt gets a plain HTTP error and never reaches the registry. While open the server
//! only writes: inbound payloads are read and discarded, and the task ends on peer close,
//! transport error or the writer dying.

use super::channel::Channel;
use super::error::{RelayError, POLICY_VIOLATION};
use super::Relay;
use crate::model::{ClientId, Role};
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// How long a closing channel may spend flushing its Close frame.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelQuery {
    pub token: Option<String>,
}

/// Upgrade handler for `OpenChannel(role, identity, token?)`.
pub async fn open_channel(
    State(relay): State<Relay>,
    Path((role, identity)): Path<(Role, ClientId)>,
    Query(query): Query<ChannelQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, RelayError> {
    debug!(%identity, %role, state = ?ChannelState::Connecting, "Upgrade requested");

    if role.is_privileged() {
        let reason = match query.token.as_deref() {
            None | Some("") => Some("missing token"),
            Some(token) => {
                if relay.handshake.verify(identity, token).await {
                    None
                } else {
                    Some("invalid token")
                }
            }
        };
        if let Some(reason) = reason {
            warn!(%identity, %role, reason, state = ?ChannelState::Closed, "Handshake rejected");
            return Err(RelayError::HandshakeRejected { identity, reason });
        }
    }

    // Registration re-checks atomically; this only spares a doomed upgrade.
    if let Some(bound) = relay.registry.role_of(identity).await? {
        if bound != role {
            return Err(RelayError::RoleConflict {
                identity,
                bound,
                requested: role,
            });
        }
    }

    Ok(ws.on_upgrade(move |socket| serve_channel(socket, relay, identity, role)))
}

/// Drives one accepted channel until it closes, then deregisters it.
pub async fn serve_channel(socket: WebSocket, relay: Relay, identity: ClientId, role: Role) {
    let (channel, mut outbound) = Channel::open(relay.channel_buffer);
    let channel_id = channel.id();
    let (mut ws_tx, mut ws_rx) = socket.split();

    if let Err(e) = relay.registry.register(identity, role, channel).await {
        warn!(%identity, %role, channel = %channel_id, error = %e, state = ?ChannelState::Closed, "Channel refused");
        let frame = CloseFrame {
            code: POLICY_VIOLATION,
            reason: e.to_string().into(),
        };
        let _ = ws_tx.send(Message::Close(Some(frame))).await;
        return;
    }
    info!(%identity, %role, channel = %channel_id, state = ?ChannelState::Open, "Channel open");

    let (stop, mut stopped) = oneshot::channel::<()>();
    let mut writer = tokio::spawn(async move {
        loop {
            tokio::select! {
                frame = outbound.recv() => match frame {
                    Some(frame) => {
                        if ws_tx.send(Message::Text(frame.to_string())).await.is_err() {
                            return;
                        }
                    }
                    None => break,
                },
                _ = &mut stopped => break,
            }
        }
        // Flushes our Close, or the reply to the peer's.
        let _ = ws_tx.close().await;
    });

    let writer_finished = loop {
        tokio::select! {
            msg = ws_rx.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break false,
                Some(Err(e)) => {
                    debug!(%identity, channel = %channel_id, error = %e, "Transport error");
                    break false;
                }
                Some(Ok(_)) => {}
            },
            _ = &mut writer => {
                debug!(%identity, channel = %channel_id, "Writer stopped");
                break true;
            }
        }
    };

    relay.registry.deregister(identity, channel_id).await;
    if !writer_finished {
        let _ = stop.send(());
        if timeout(CLOSE_GRACE, &mut writer).await.is_err() {
            debug!(%identity, channel = %channel_id, "Close handshake timed out");
            writer.abort();
        }
    }
    info!(%identity, %role, channel = %channel_id, state = ?ChannelState::Closed, "Channel closed");
}
