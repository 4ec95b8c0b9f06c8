//! The lock table and its reducer.
//!
//! [`LockStore`] keeps one partition per lockable category. The store state
//! threaded through [`reduce`] is an `Option<LockStore>`: `Some` once the
//! store has been initialised, `None` after a reset ("not ready", which is
//! not the same thing as "no locks").
//!
//! Locks are keyed by the entity that effectively holds them. A lock carrying
//! a `recurrence_id` is recorded against the whole series, a planning item
//! locked through its linked event is recorded against that event, and
//! everything else is recorded against the item itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::item::ItemType;
use crate::session::Session;
use crate::types::{ItemId, SessionId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Lock actions
// ---------------------------------------------------------------------------

/// Known operations a lock may be taken for.
pub mod lock_actions {
    pub const EDIT: &str = "edit";
    pub const RESCHEDULE: &str = "reschedule";
    pub const POSTPONE: &str = "postpone";
    pub const CANCEL: &str = "cancel";
    pub const UPDATE_TIME: &str = "update_time";
    pub const UPDATE_REPETITIONS: &str = "update_repetitions";
    pub const CONVERT_RECURRING: &str = "convert_recurring";
    pub const POST: &str = "post";
    pub const ASSIGN_CALENDAR: &str = "assign_calendar";
}

// ---------------------------------------------------------------------------
// Lock
// ---------------------------------------------------------------------------

/// One held lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// The item the lock was requested on. For series and event-level locks
    /// this can differ from the key the lock is stored under.
    pub item_id: ItemId,
    pub item_type: ItemType,
    pub action: String,
    pub user: UserId,
    pub session: SessionId,
    pub time: Timestamp,
}

impl Lock {
    /// `true` when the lock belongs to exactly this user and session.
    pub fn is_held_by(&self, session: &Session) -> bool {
        self.user == session.user_id && self.session == session.session_id
    }
}

// ---------------------------------------------------------------------------
// LockStore
// ---------------------------------------------------------------------------

/// All locks currently known to this client, partitioned by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStore {
    #[serde(default)]
    pub event: HashMap<ItemId, Lock>,
    #[serde(default)]
    pub planning: HashMap<ItemId, Lock>,
    #[serde(default)]
    pub recurring: HashMap<ItemId, Lock>,
    #[serde(default)]
    pub assignment: HashMap<ItemId, Lock>,
}

impl LockStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition_mut(&mut self, item_type: ItemType) -> &mut HashMap<ItemId, Lock> {
        match item_type {
            ItemType::Event => &mut self.event,
            ItemType::Planning => &mut self.planning,
            ItemType::Recurring => &mut self.recurring,
            ItemType::Assignment => &mut self.assignment,
        }
    }

    /// Total number of locks across all partitions.
    pub fn len(&self) -> usize {
        self.event.len() + self.planning.len() + self.recurring.len() + self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every lock in every partition.
    pub fn iter(&self) -> impl Iterator<Item = &Lock> {
        self.event
            .values()
            .chain(self.planning.values())
            .chain(self.recurring.values())
            .chain(self.assignment.values())
    }

    /// Locks held by `user_id` in any session.
    pub fn locks_for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Lock> {
        self.iter().filter(move |lock| lock.user == user_id)
    }

    /// Locks held by exactly this user and session.
    pub fn locks_for_session<'a>(
        &'a self,
        session: &'a Session,
    ) -> impl Iterator<Item = &'a Lock> {
        self.iter().filter(move |lock| lock.is_held_by(session))
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A bulk lock listing received on initial load or reconnect.
///
/// Any partition may be missing; missing partitions are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockSnapshot {
    #[serde(default)]
    pub event: Option<HashMap<ItemId, Lock>>,
    #[serde(default)]
    pub planning: Option<HashMap<ItemId, Lock>>,
    #[serde(default)]
    pub recurring: Option<HashMap<ItemId, Lock>>,
    #[serde(default)]
    pub assignment: Option<HashMap<ItemId, Lock>>,
}

impl LockSnapshot {
    pub fn into_store(self) -> LockStore {
        LockStore {
            event: self.event.unwrap_or_default(),
            planning: self.planning.unwrap_or_default(),
            recurring: self.recurring.unwrap_or_default(),
            assignment: self.assignment.unwrap_or_default(),
        }
    }
}

impl From<LockStore> for LockSnapshot {
    fn from(store: LockStore) -> Self {
        Self {
            event: Some(store.event),
            planning: Some(store.planning),
            recurring: Some(store.recurring),
            assignment: Some(store.assignment),
        }
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A real-time lock or unlock notification.
///
/// Field names follow the backend's websocket payload. Every field is
/// optional on the wire so that malformed payloads can still be decoded and
/// then rejected by [`LockNotification::validate`] instead of failing the
/// whole message stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockNotification {
    #[serde(rename = "item", default)]
    pub item_id: Option<ItemId>,

    #[serde(rename = "type", default)]
    pub item_type: Option<ItemType>,

    #[serde(rename = "lock_action", default)]
    pub action: Option<String>,

    #[serde(default)]
    pub user: Option<UserId>,

    #[serde(rename = "lock_session", default)]
    pub session: Option<SessionId>,

    #[serde(rename = "lock_time", default)]
    pub time: Option<Timestamp>,

    /// Series id when the lock covers a whole recurring series.
    #[serde(default)]
    pub recurrence_id: Option<ItemId>,

    /// Linked event id when a planning item is locked through its event.
    #[serde(default)]
    pub event_item: Option<ItemId>,
}

impl LockNotification {
    /// Notification for a lock taken directly on an item.
    pub fn new(
        item_id: impl Into<ItemId>,
        item_type: ItemType,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            item_id: Some(item_id.into()),
            item_type: Some(item_type),
            action: Some(action.into()),
            user: Some(user.into()),
            session: Some(session.into()),
            ..Self::default()
        }
    }

    /// Notification identifying an item to unlock.
    pub fn unlock(item_id: impl Into<ItemId>, item_type: ItemType) -> Self {
        Self {
            item_id: Some(item_id.into()),
            item_type: Some(item_type),
            ..Self::default()
        }
    }

    pub fn with_recurrence(mut self, recurrence_id: impl Into<ItemId>) -> Self {
        self.recurrence_id = Some(recurrence_id.into());
        self
    }

    pub fn with_event_item(mut self, event_id: impl Into<ItemId>) -> Self {
        self.event_item = Some(event_id.into());
        self
    }

    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Check that the notification identifies an item.
    pub fn validate(&self) -> Result<(), CoreError> {
        if non_empty(&self.item_id).is_none() {
            return Err(CoreError::Validation(
                "Lock notification is missing 'item'".to_string(),
            ));
        }
        if self.item_type.is_none() {
            return Err(CoreError::Validation(
                "Lock notification is missing 'type'".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that the notification identifies an item and its lock holder.
    pub fn validate_lock(&self) -> Result<(), CoreError> {
        self.validate()?;
        if non_empty(&self.user).is_none() {
            return Err(CoreError::Validation(
                "Lock notification is missing 'user'".to_string(),
            ));
        }
        if non_empty(&self.session).is_none() {
            return Err(CoreError::Validation(
                "Lock notification is missing 'lock_session'".to_string(),
            ));
        }
        Ok(())
    }

    /// The partition and key this notification's lock is recorded under.
    ///
    /// Precedence: recurring series, then linked event, then the item itself.
    fn storage_key(&self) -> Option<(ItemType, &str)> {
        if let Some(recurrence_id) = non_empty(&self.recurrence_id) {
            return Some((ItemType::Recurring, recurrence_id));
        }
        if let Some(event_id) = non_empty(&self.event_item) {
            return Some((ItemType::Event, event_id));
        }
        Some((self.item_type?, non_empty(&self.item_id)?))
    }

    fn to_lock(&self, item_type: ItemType) -> Lock {
        Lock {
            item_id: self.item_id.clone().unwrap_or_default(),
            item_type,
            action: self.action.clone().unwrap_or_default(),
            user: self.user.clone().unwrap_or_default(),
            session: self.session.clone().unwrap_or_default(),
            time: self.time.unwrap_or_else(chrono::Utc::now),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Everything that may change the lock table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockStoreAction {
    Init,
    Reset,
    Receive(LockSnapshot),
    ItemLocked(LockNotification),
    ItemUnlocked(LockNotification),
}

impl LockStoreAction {
    /// Decode an action from `{"type": "...", "payload": ...}`.
    ///
    /// An unknown `type` is a contract violation by the dispatcher and is
    /// reported as [`CoreError::Validation`].
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| CoreError::Validation("Lock store action has no 'type'".to_string()))?;
        if !matches!(
            kind,
            "INIT" | "RESET" | "RECEIVE" | "ITEM_LOCKED" | "ITEM_UNLOCKED"
        ) {
            return Err(CoreError::Validation(format!(
                "Unknown lock store action '{kind}'"
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LockStoreAction::Init => "INIT",
            LockStoreAction::Reset => "RESET",
            LockStoreAction::Receive(_) => "RECEIVE",
            LockStoreAction::ItemLocked(_) => "ITEM_LOCKED",
            LockStoreAction::ItemUnlocked(_) => "ITEM_UNLOCKED",
        }
    }
}

/// Produce the next lock table from the current one and an action.
///
/// Never panics and never fails: malformed notifications leave the state
/// untouched and are reported through `tracing`.
pub fn reduce(state: Option<LockStore>, action: LockStoreAction) -> Option<LockStore> {
    tracing::trace!(action = action.name(), ready = state.is_some(), "Reducing lock store");
    match action {
        LockStoreAction::Init => Some(LockStore::default()),
        LockStoreAction::Reset => None,
        LockStoreAction::Receive(snapshot) => {
            let store = snapshot.into_store();
            tracing::debug!(locks = store.len(), "Received lock snapshot");
            Some(store)
        }
        LockStoreAction::ItemLocked(data) => {
            let Some(mut store) = state else {
                tracing::debug!(
                    item = ?data.item_id,
                    "Dropping lock notification, store not ready"
                );
                return None;
            };
            if let Err(e) = data.validate_lock() {
                tracing::warn!(error = %e, "Ignoring malformed lock notification");
                return Some(store);
            }
            if let Some((partition, key)) = data.storage_key() {
                let lock = data.to_lock(data.item_type.unwrap_or(partition));
                tracing::debug!(
                    partition = %partition,
                    key,
                    user = %lock.user,
                    action = %lock.action,
                    "Item locked"
                );
                store.partition_mut(partition).insert(key.to_string(), lock);
            }
            Some(store)
        }
        LockStoreAction::ItemUnlocked(data) => {
            let Some(mut store) = state else {
                tracing::debug!(
                    item = ?data.item_id,
                    "Dropping unlock notification, store not ready"
                );
                return None;
            };
            if let Err(e) = data.validate() {
                tracing::warn!(error = %e, "Ignoring malformed unlock notification");
                return Some(store);
            }
            if let Some((partition, key)) = data.storage_key() {
                if store.partition_mut(partition).remove(key).is_some() {
                    tracing::debug!(partition = %partition, key, "Item unlocked");
                }
            }
            Some(store)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
