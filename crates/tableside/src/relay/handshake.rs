//! # Credential Handshake
//!
//! Staff authenticate over HTTP and receive a token bound to their identity; the token is
//! then presented when opening the admin channel. At most one token is live per identity:
//! issuing again replaces the previous one.
//!
//! Tokens are reusable until replaced, so one handshake covers several tabs. With a TTL
//! configured, a token older than the TTL fails verification and is evicted.

use super::error::RelayError;
use crate::model::ClientId;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tableside_actor::FrameworkError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

const TOKEN_BYTES: usize = 32;

/// Secret handed to a staff member out of band.
#[derive(Clone, Serialize)]
pub struct HandshakeToken {
    token: String,
}

impl HandshakeToken {
    fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self {
            token: URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for HandshakeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HandshakeToken([REDACTED])")
    }
}

#[derive(Debug)]
pub enum HandshakeRequest {
    Issue {
        identity: ClientId,
        respond_to: oneshot::Sender<HandshakeToken>,
    },
    Verify {
        identity: ClientId,
        presented: String,
        respond_to: oneshot::Sender<bool>,
    },
}

struct Issued {
    token: HandshakeToken,
    at: Instant,
}

pub struct HandshakeActor {
    receiver: mpsc::Receiver<HandshakeRequest>,
    tokens: HashMap<ClientId, Issued>,
    ttl: Option<Duration>,
}

impl HandshakeActor {
    /// `ttl` of `None` keeps tokens until they are re-issued.
    pub fn new(mailbox_size: usize, ttl: Option<Duration>) -> (Self, HandshakeClient) {
        let (sender, receiver) = mpsc::channel(mailbox_size.max(1));
        let actor = Self {
            receiver,
            tokens: HashMap::new(),
            ttl,
        };
        (actor, HandshakeClient { sender })
    }

    pub async fn run(mut self) {
        info!(ttl = ?self.ttl, "Handshake started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                HandshakeRequest::Issue {
                    identity,
                    respond_to,
                } => {
                    let token = HandshakeToken::generate();
                    let replaced = self
                        .tokens
                        .insert(
                            identity,
                            Issued {
                                token: token.clone(),
                                at: Instant::now(),
                            },
                        )
                        .is_some();
                    info!(%identity, replaced, "Token issued");
                    let _ = respond_to.send(token);
                }
                HandshakeRequest::Verify {
                    identity,
                    presented,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.verify(identity, &presented));
                }
            }
        }

        info!("Handshake shutdown");
    }

    fn verify(&mut self, identity: ClientId, presented: &str) -> bool {
        let Some(issued) = self.tokens.get(&identity) else {
            debug!(%identity, "No token issued");
            return false;
        };

        if let Some(ttl) = self.ttl {
            if issued.at.elapsed() >= ttl {
                self.tokens.remove(&identity);
                info!(%identity, "Token expired");
                return false;
            }
        }

        let matches: bool = issued
            .token
            .as_str()
            .as_bytes()
            .ct_eq(presented.as_bytes())
            .into();
        if !matches {
            warn!(%identity, "Token mismatch");
        }
        matches
    }
}

#[derive(Clone)]
pub struct HandshakeClient {
    sender: mpsc::Sender<HandshakeRequest>,
}

impl HandshakeClient {
    /// Issues a fresh token for `identity`, invalidating any previous one.
    ///
    /// The caller must already have authenticated the requester as staff.
    pub async fn issue(&self, identity: ClientId) -> Result<HandshakeToken, RelayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HandshakeRequest::Issue {
                identity,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(response.await.map_err(|_| FrameworkError::ActorDropped)?)
    }

    /// Whether `presented` is the live token for `identity`.
    ///
    /// Never fails: an unknown identity, a stopped actor or a wrong token all answer `false`.
    pub async fn verify(&self, identity: ClientId, presented: &str) -> bool {
        let (respond_to, response) = oneshot::channel();
        let request = HandshakeRequest::Verify {
            identity,
            presented: presented.to_string(),
            respond_to,
        };
        if self.sender.send(request).await.is_err() {
            warn!(%identity, "Handshake actor unavailable, rejecting");
            return false;
        }
        response.await.unwrap_or(false)
    }
}
