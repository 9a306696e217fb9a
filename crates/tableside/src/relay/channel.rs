//! One live outbound channel: the sending half of a bounded queue drained by the
//! connection's writer task.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// A serialized event, shared by every channel it is delivered to.
pub type Frame = Arc<str>;

static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a channel. Two channels of the same client never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    fn next() -> Self {
        Self(NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// Why a frame could not be queued on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendFailure {
    /// The peer is not keeping up. The frame is dropped for this channel only.
    #[error("outbound queue full")]
    Full,
    /// The writer task is gone; the channel is dead.
    #[error("channel closed")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    sender: mpsc::Sender<Frame>,
}

impl Channel {
    /// Opens a channel whose queue holds up to `buffer` frames.
    ///
    /// The receiver belongs to whoever writes to the transport.
    pub fn open(buffer: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let channel = Self {
            id: ChannelId::next(),
            sender,
        };
        (channel, receiver)
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Queues a frame without waiting.
    pub fn try_deliver(&self, frame: Frame) -> Result<(), SendFailure> {
        self.sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => SendFailure::Full,
            TrySendError::Closed(_) => SendFailure::Closed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
