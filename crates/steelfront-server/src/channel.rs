//! Client channel abstraction.
//!
//! Implementations typically wrap a WebSocket; the session layer only ever
//! sees this trait, so transports stay swappable and tests run without a
//! network.

use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Clone, Debug, Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,
    #[error("send failed: {0}")]
    Send(String),
}

/// One client's outbound pipe.
pub trait ClientChannel: Send + Sync {
    /// Queue one serialized frame for delivery. A failure marks the client
    /// disconnected; it must never affect the simulation.
    fn send(&self, message: &[u8]) -> Result<(), ChannelError>;

    fn is_alive(&self) -> bool;

    /// Close the underlying transport. Idempotent.
    fn close(&self);
}

/// In-process channel delivering frames into a tokio mpsc queue.
///
/// The bundled implementation for tests and embedding; real deployments
/// wrap their socket type instead.
pub struct LoopbackChannel {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl LoopbackChannel {
    /// Returns the channel plus the receiving end of the frame queue.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ClientChannel for LoopbackChannel {
    fn send(&self, message: &[u8]) -> Result<(), ChannelError> {
        self.tx
            .send(message.to_vec())
            .map_err(|_| ChannelError::Closed)
    }

    fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }

    fn close(&self) {
        // Dropping the receiver closes the pipe; nothing to do on this side.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_delivers_frames_in_order() {
        let (channel, mut rx) = LoopbackChannel::new();
        assert!(channel.is_alive());
        channel.send(b"one").unwrap();
        channel.send(b"two").unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"one");
        assert_eq!(rx.try_recv().unwrap(), b"two");
    }

    #[test]
    fn dropped_receiver_kills_the_channel() {
        let (channel, rx) = LoopbackChannel::new();
        drop(rx);
        assert!(!channel.is_alive());
        assert!(channel.send(b"late").is_err());
    }
}
