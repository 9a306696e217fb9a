//! # Generic Messages
//!
//! Message types exchanged between a [`ResourceClient`](crate::ResourceClient) and its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Result of an accepted update: the entity after the write and the change it reported.
#[derive(Debug, Clone)]
pub struct Updated<T: ActorEntity> {
    pub entity: T,
    pub change: T::Change,
}

/// Request sent to a resource actor.
///
/// The variants cover the operations a resource store needs: creation, lookup by id,
/// ordered listing and update. Each request carries its own reply channel.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    /// Answered with the entity as stored, id assigned.
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Updated<T>>,
    },
}
