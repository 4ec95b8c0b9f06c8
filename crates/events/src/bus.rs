//! In-process lock message bus backed by a `tokio::sync::broadcast` channel.
//!
//! The websocket reader publishes every decoded [`LockMessage`] here. The
//! [`LockDispatcher`](crate::dispatcher::LockDispatcher) is the usual
//! subscriber; hosts may add their own (e.g. to refresh open editors).

use tokio::sync::broadcast;

use crate::config::{LockSyncConfig, DEFAULT_BUS_CAPACITY};
use crate::message::LockMessage;

/// Fan-out bus for lock messages.
///
/// Designed to be shared via `Arc<LockBus>`.
///
/// ```rust
/// use planning_events::{LockBus, LockMessage};
///
/// let bus = LockBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(LockMessage::LocksReset);
/// ```
pub struct LockBus {
    sender: broadcast::Sender<LockMessage>,
}

impl LockBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread messages are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn from_config(config: &LockSyncConfig) -> Self {
        Self::new(config.bus_capacity)
    }

    /// Publish a message to all current subscribers.
    ///
    /// Messages published while nobody is subscribed are dropped.
    pub fn publish(&self, message: LockMessage) {
        if self.sender.send(message).is_err() {
            tracing::debug!("Lock message published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LockMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LockBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use planning_core::locks::LockNotification;
    use planning_core::ItemType;

    use super::*;

    #[tokio::test]
    async fn test_publish_and_receive_single_subscriber() {
        let bus = LockBus::default();
        let mut rx = bus.subscribe();

        let message = LockMessage::ItemLock(LockNotification::new(
            "e1",
            ItemType::Event,
            "u1",
            "s1",
            "edit",
        ));
        bus.publish(message.clone());

        let received = rx.recv().await.expect("should receive the message");
        assert_eq!(received, message);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_message() {
        let bus = LockBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(LockMessage::LocksReset);

        assert_eq!(rx1.recv().await.unwrap(), LockMessage::LocksReset);
        assert_eq!(rx2.recv().await.unwrap(), LockMessage::LocksReset);
    }

    #[test]
    fn test_publish_with_no_subscribers_does_not_panic() {
        let bus = LockBus::new(0);
        bus.publish(LockMessage::LocksReset);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
