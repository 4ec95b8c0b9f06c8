//! Websocket envelope for lock traffic.
//!
//! The backend pushes JSON objects tagged by an `"event"` field:
//!
//! ```json
//! {"event": "item:lock", "item": "p1", "type": "planning", "user": "u1",
//!  "lock_session": "s1", "lock_action": "edit"}
//! {"event": "item:unlock", "item": "p1", "type": "planning"}
//! {"event": "locks:receive", "locks": {"event": {...}, "planning": {...}}}
//! {"event": "locks:reset"}
//! ```

use planning_core::locks::{LockNotification, LockSnapshot, LockStoreAction};
use serde::{Deserialize, Serialize};

use crate::error::EventsError;

/// A lock message as received from the websocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LockMessage {
    #[serde(rename = "item:lock")]
    ItemLock(LockNotification),

    #[serde(rename = "item:unlock")]
    ItemUnlock(LockNotification),

    /// Full listing sent on connect and reconnect, nested under `locks` so
    /// its `event` partition cannot collide with the tag.
    #[serde(rename = "locks:receive")]
    LocksReceive { locks: LockSnapshot },

    #[serde(rename = "locks:reset")]
    LocksReset,
}

impl LockMessage {
    /// Decode a message and reject notifications that do not identify their
    /// item (and, for locks, their holder).
    pub fn from_json(raw: &str) -> Result<Self, EventsError> {
        let message: LockMessage = serde_json::from_str(raw)?;
        match &message {
            LockMessage::ItemLock(data) => data.validate_lock()?,
            LockMessage::ItemUnlock(data) => data.validate()?,
            LockMessage::LocksReceive { .. } | LockMessage::LocksReset => {}
        }
        Ok(message)
    }

    /// The wire event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            LockMessage::ItemLock(_) => "item:lock",
            LockMessage::ItemUnlock(_) => "item:unlock",
            LockMessage::LocksReceive { .. } => "locks:receive",
            LockMessage::LocksReset => "locks:reset",
        }
    }

    pub fn into_action(self) -> LockStoreAction {
        match self {
            LockMessage::ItemLock(data) => LockStoreAction::ItemLocked(data),
            LockMessage::ItemUnlock(data) => LockStoreAction::ItemUnlocked(data),
            LockMessage::LocksReceive { locks } => LockStoreAction::Receive(locks),
            LockMessage::LocksReset => LockStoreAction::Reset,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
