//! Shared handle to the client's lock table.
//!
//! The table is held as `Option<LockStore>` behind a `tokio::sync::RwLock`.
//! [`LockStoreHandle::apply`] is the only writer and always goes through the
//! core reducer, so every transition is one atomic `reduce` step.

use std::sync::Arc;

use planning_core::locks::{reduce, LockStore, LockStoreAction};
use tokio::sync::RwLock;

use crate::error::EventsError;
use crate::message::LockMessage;

/// Cloneable handle; all clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct LockStoreHandle {
    state: Arc<RwLock<Option<LockStore>>>,
}

impl LockStoreHandle {
    /// A handle whose store is not ready yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle with an initialised, empty store.
    pub fn initialised() -> Self {
        Self {
            state: Arc::new(RwLock::new(reduce(None, LockStoreAction::Init))),
        }
    }

    /// Copy of the current table.
    pub async fn snapshot(&self) -> Option<LockStore> {
        self.state.read().await.clone()
    }

    /// Run `f` against the current table without copying it.
    pub async fn read<R>(&self, f: impl FnOnce(Option<&LockStore>) -> R) -> R {
        let guard = self.state.read().await;
        f(guard.as_ref())
    }

    pub async fn is_ready(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn apply(&self, action: LockStoreAction) {
        let mut guard = self.state.write().await;
        let current = guard.take();
        *guard = reduce(current, action);
    }

    pub async fn apply_message(&self, message: LockMessage) {
        self.apply(message.into_action()).await;
    }

    /// Decode a websocket payload and apply it.
    ///
    /// A payload that fails to decode or validate leaves the table untouched.
    pub async fn apply_json(&self, raw: &str) -> Result<(), EventsError> {
        let message = LockMessage::from_json(raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected lock message");
        })?;
        self.apply_message(message).await;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
