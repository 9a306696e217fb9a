//! # Delivery Engine
//!
//! Pushes an [`Event`] to one identity or to every identity of a role. The event is
//! serialized once; each target channel then gets a non-blocking enqueue. A full queue
//! drops the event for that channel only. A closed queue means the peer is gone: the
//! channel is deregistered and delivery carries on with the rest.
//!
//! Nothing here fails the caller. The [`DeliveryReport`] exists for logging.

use super::channel::{Channel, Frame, SendFailure};
use super::registry::RegistryClient;
use crate::events::Event;
use crate::model::{ClientId, Role};
use serde::Serialize;
use std::ops::AddAssign;
use tracing::{debug, error, info, warn};

/// Per-call delivery counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    /// Queued on a live channel.
    pub delivered: usize,
    /// Skipped because the channel's queue was full.
    pub dropped: usize,
    /// The channel was closed and has been deregistered.
    pub failed: usize,
}

impl DeliveryReport {
    pub fn targets(&self) -> usize {
        self.delivered + self.dropped + self.failed
    }
}

impl AddAssign for DeliveryReport {
    fn add_assign(&mut self, other: Self) {
        self.delivered += other.delivered;
        self.dropped += other.dropped;
        self.failed += other.failed;
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    registry: RegistryClient,
}

impl Dispatcher {
    pub fn new(registry: RegistryClient) -> Self {
        Self { registry }
    }

    /// Sends `event` on every channel of `identity`, in registration order.
    ///
    /// An identity with no channels is a silent no-op.
    pub async fn unicast(&self, event: &Event, identity: ClientId) -> DeliveryReport {
        let targets = match self.registry.channels_for(identity).await {
            Ok(channels) => channels.into_iter().map(|c| (identity, c)).collect(),
            Err(e) => {
                warn!(event = event.name(), %identity, error = %e, "Unicast skipped");
                return DeliveryReport::default();
            }
        };
        let report = self.deliver(event, targets).await;
        info!(event = event.name(), %identity, ?report, "Unicast");
        report
    }

    /// Sends `event` to every identity bound to `role`, or to everyone for `None`.
    pub async fn broadcast(&self, event: &Event, role: Option<Role>) -> DeliveryReport {
        let targets = match self.registry.channels_for_role(role).await {
            Ok(targets) => targets,
            Err(e) => {
                warn!(event = event.name(), ?role, error = %e, "Broadcast skipped");
                return DeliveryReport::default();
            }
        };
        let report = self.deliver(event, targets).await;
        info!(event = event.name(), ?role, ?report, "Broadcast");
        report
    }

    async fn deliver(&self, event: &Event, targets: Vec<(ClientId, Channel)>) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        if targets.is_empty() {
            return report;
        }

        let frame: Frame = match serde_json::to_string(event) {
            Ok(json) => json.into(),
            Err(e) => {
                error!(event = event.name(), error = %e, "Event serialization failed");
                return report;
            }
        };

        for (identity, channel) in targets {
            match channel.try_deliver(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(SendFailure::Full) => {
                    warn!(%identity, channel = %channel.id(), event = event.name(), "Slow peer, event dropped");
                    report.dropped += 1;
                }
                Err(SendFailure::Closed) => {
                    warn!(%identity, channel = %channel.id(), event = event.name(), "Channel closed, deregistering");
                    self.registry.deregister(identity, channel.id()).await;
                    report.failed += 1;
                }
            }
        }
        debug!(event = event.name(), targets = report.targets(), "Delivered");
        report
    }
}
