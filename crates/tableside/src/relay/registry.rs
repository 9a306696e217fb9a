//! # Connection Registry
//!
//! Tracks which live channels belong to which identity, and the role each identity is
//! bound to. The maps are owned by [`RegistryActor`]; every read and write is a message,
//! so register, deregister and snapshot are atomic with respect to one another.
//!
//! Queries answer with snapshot copies. Callers send on the snapshot after the actor has
//! moved on, so no send ever happens while the maps are being mutated.

use super::channel::{Channel, ChannelId};
use super::error::RelayError;
use crate::model::{ClientId, Role};
use std::collections::HashMap;
use tableside_actor::FrameworkError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum RegistryRequest {
    Register {
        identity: ClientId,
        role: Role,
        channel: Channel,
        respond_to: Reply<Result<(), RelayError>>,
    },
    Deregister {
        identity: ClientId,
        channel: ChannelId,
        respond_to: Reply<bool>,
    },
    ChannelsFor {
        identity: ClientId,
        respond_to: Reply<Vec<Channel>>,
    },
    ChannelsForRole {
        role: Option<Role>,
        respond_to: Reply<Vec<(ClientId, Channel)>>,
    },
    RoleOf {
        identity: ClientId,
        respond_to: Reply<Option<Role>>,
    },
}

/// An identity's role binding and its channels, in registration order.
///
/// The binding outlives its channels: an identity whose last channel closed keeps its role.
#[derive(Debug)]
struct Binding {
    role: Role,
    channels: Vec<Channel>,
}

pub struct RegistryActor {
    receiver: mpsc::Receiver<RegistryRequest>,
    bindings: HashMap<ClientId, Binding>,
}

impl RegistryActor {
    pub fn new(mailbox_size: usize) -> (Self, RegistryClient) {
        let (sender, receiver) = mpsc::channel(mailbox_size.max(1));
        let actor = Self {
            receiver,
            bindings: HashMap::new(),
        };
        (actor, RegistryClient { sender })
    }

    pub async fn run(mut self) {
        info!("Registry started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                RegistryRequest::Register {
                    identity,
                    role,
                    channel,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.register(identity, role, channel));
                }
                RegistryRequest::Deregister {
                    identity,
                    channel,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.deregister(identity, channel));
                }
                RegistryRequest::ChannelsFor {
                    identity,
                    respond_to,
                } => {
                    let channels = self
                        .bindings
                        .get(&identity)
                        .map(|b| b.channels.clone())
                        .unwrap_or_default();
                    let _ = respond_to.send(channels);
                }
                RegistryRequest::ChannelsForRole { role, respond_to } => {
                    let channels = self
                        .bindings
                        .iter()
                        .filter(|(_, b)| role.map_or(true, |r| b.role == r))
                        .flat_map(|(id, b)| b.channels.iter().map(|c| (*id, c.clone())))
                        .collect();
                    let _ = respond_to.send(channels);
                }
                RegistryRequest::RoleOf {
                    identity,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.bindings.get(&identity).map(|b| b.role));
                }
            }
        }

        info!(identities = self.bindings.len(), "Registry shutdown");
    }

    fn register(
        &mut self,
        identity: ClientId,
        role: Role,
        channel: Channel,
    ) -> Result<(), RelayError> {
        let binding = self.bindings.entry(identity).or_insert_with(|| {
            debug!(%identity, %role, "Role bound");
            Binding {
                role,
                channels: Vec::new(),
            }
        });

        if binding.role != role {
            warn!(%identity, bound = %binding.role, requested = %role, "Role conflict");
            return Err(RelayError::RoleConflict {
                identity,
                bound: binding.role,
                requested: role,
            });
        }

        let channel_id = channel.id();
        if binding.channels.iter().any(|c| c.id() == channel_id) {
            debug!(%identity, channel = %channel_id, "Already registered");
            return Ok(());
        }
        binding.channels.push(channel);
        info!(%identity, %role, channel = %channel_id, open = binding.channels.len(), "Channel registered");
        Ok(())
    }

    fn deregister(&mut self, identity: ClientId, channel: ChannelId) -> bool {
        let Some(binding) = self.bindings.get_mut(&identity) else {
            return false;
        };
        let before = binding.channels.len();
        binding.channels.retain(|c| c.id() != channel);
        let removed = binding.channels.len() != before;
        if removed {
            info!(%identity, %channel, open = binding.channels.len(), "Channel deregistered");
        }
        removed
    }
}

/// Cloneable handle to the [`RegistryActor`].
#[derive(Clone)]
pub struct RegistryClient {
    sender: mpsc::Sender<RegistryRequest>,
}

impl RegistryClient {
    async fn request<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> RegistryRequest,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Admits `channel` under `identity`, binding `role` if the identity is new.
    ///
    /// Fails with [`RelayError::RoleConflict`] if the identity is bound to another role;
    /// the channel is then not admitted and the existing binding is untouched.
    pub async fn register(
        &self,
        identity: ClientId,
        role: Role,
        channel: Channel,
    ) -> Result<(), RelayError> {
        self.request(|respond_to| RegistryRequest::Register {
            identity,
            role,
            channel,
            respond_to,
        })
        .await?
    }

    /// Removes a channel. Returns whether it was registered; removing twice is harmless.
    pub async fn deregister(&self, identity: ClientId, channel: ChannelId) -> bool {
        self.request(|respond_to| RegistryRequest::Deregister {
            identity,
            channel,
            respond_to,
        })
        .await
        .unwrap_or(false)
    }

    /// Snapshot of an identity's channels, in registration order.
    pub async fn channels_for(&self, identity: ClientId) -> Result<Vec<Channel>, RelayError> {
        Ok(self
            .request(|respond_to| RegistryRequest::ChannelsFor {
                identity,
                respond_to,
            })
            .await?)
    }

    /// Snapshot of every channel whose identity has `role`, or of all channels for `None`.
    pub async fn channels_for_role(
        &self,
        role: Option<Role>,
    ) -> Result<Vec<(ClientId, Channel)>, RelayError> {
        Ok(self
            .request(|respond_to| RegistryRequest::ChannelsForRole { role, respond_to })
            .await?)
    }

    pub async fn role_of(&self, identity: ClientId) -> Result<Option<Role>, RelayError> {
        Ok(self
            .request(|respond_to| RegistryRequest::RoleOf {
                identity,
                respond_to,
            })
            .await?)
    }
}
