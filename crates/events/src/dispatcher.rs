//! Background task feeding bus messages into the lock table.
//!
//! [`LockDispatcher`] subscribes to the [`LockBus`](crate::bus::LockBus)
//! broadcast channel and applies every received message to a
//! [`LockStoreHandle`], one at a time and in arrival order. It shuts down
//! when the bus is dropped.

use planning_core::locks::LockStoreAction;
use tokio::sync::broadcast;

use crate::config::LockSyncConfig;
use crate::handle::LockStoreHandle;
use crate::message::LockMessage;

/// Applies lock messages from the bus to a shared lock table.
pub struct LockDispatcher {
    handle: LockStoreHandle,
    snapshot_on_lag: bool,
}

impl LockDispatcher {
    pub fn new(handle: LockStoreHandle, config: &LockSyncConfig) -> Self {
        Self {
            handle,
            snapshot_on_lag: config.snapshot_on_lag,
        }
    }

    /// Run the dispatch loop until the channel is closed.
    ///
    /// Messages are not reordered. After a lag the table has missed
    /// transitions; with `snapshot_on_lag` set it is torn down so readers
    /// see "not ready" until the next `locks:receive` snapshot arrives.
    pub async fn run(self, mut receiver: broadcast::Receiver<LockMessage>) {
        loop {
            match receiver.recv().await {
                Ok(message) => {
                    tracing::debug!(event = message.event_name(), "Applying lock message");
                    self.handle.apply_message(message).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        reset = self.snapshot_on_lag,
                        "Lock dispatcher lagged, some lock messages were missed"
                    );
                    if self.snapshot_on_lag {
                        self.handle.apply(LockStoreAction::Reset).await;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Lock bus closed, dispatcher shutting down");
                    break;
                }
            }
        }
    }
}
