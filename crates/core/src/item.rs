//! Read-only views of the planning entities the lock and action logic inspects.
//!
//! The core does not own events, planning items or assignments. It only reads
//! the handful of fields modelled on [`Item`]: identity, explicit type,
//! workflow state, post status, series membership, linked events, the optional
//! denormalised lock stamp and the expiry flag.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, SessionId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Item type
// ---------------------------------------------------------------------------

/// Explicit discriminant for everything that can be locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Event,
    Planning,
    /// A recurring series of events sharing one `recurrence_id`.
    #[serde(alias = "recurring-series")]
    Recurring,
    Assignment,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Event => "event",
            ItemType::Planning => "planning",
            ItemType::Recurring => "recurring",
            ItemType::Assignment => "assignment",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Workflow state
// ---------------------------------------------------------------------------

/// Lifecycle stage of an event or planning item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    #[default]
    Draft,
    Active,
    Ingested,
    Scheduled,
    Killed,
    Cancelled,
    Rescheduled,
    Postponed,
    Spiked,
}

impl WorkflowState {
    pub fn is_spiked(&self) -> bool {
        matches!(self, WorkflowState::Spiked)
    }

    /// No further scheduling work happens in these states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Killed
                | WorkflowState::Cancelled
                | WorkflowState::Rescheduled
                | WorkflowState::Spiked
        )
    }
}

/// Publication status of an item that has been posted at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Usable,
    Withheld,
    Cancelled,
}

/// Lifecycle stage of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    Assigned,
    Submitted,
    InProgress,
    Completed,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// An event, planning item or assignment as seen by the lock/action logic.
///
/// Constructed via [`Item::new`] and refined with the `with_*` builder
/// methods, or deserialised directly from the backend's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    #[serde(default)]
    pub state: WorkflowState,

    #[serde(default)]
    pub pubstatus: Option<PostStatus>,

    /// Series id for recurring events. Planning items created from a
    /// recurring event carry the same id.
    #[serde(default)]
    pub recurrence_id: Option<ItemId>,

    /// Events a planning item is linked to.
    #[serde(default)]
    pub related_event_ids: Vec<ItemId>,

    #[serde(default)]
    pub lock_user: Option<UserId>,

    #[serde(default)]
    pub lock_session: Option<SessionId>,

    #[serde(default)]
    pub lock_action: Option<String>,

    #[serde(default)]
    pub lock_time: Option<Timestamp>,

    #[serde(default)]
    pub expired: bool,

    #[serde(default)]
    pub assignment_state: Option<AssignmentState>,

    #[serde(default)]
    pub assigned_user: Option<UserId>,
}

impl Item {
    /// Create a draft item with no optional fields set.
    pub fn new(id: impl Into<ItemId>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            item_type,
            state: WorkflowState::Draft,
            pubstatus: None,
            recurrence_id: None,
            related_event_ids: Vec::new(),
            lock_user: None,
            lock_session: None,
            lock_action: None,
            lock_time: None,
            expired: false,
            assignment_state: None,
            assigned_user: None,
        }
    }

    pub fn event(id: impl Into<ItemId>) -> Self {
        Self::new(id, ItemType::Event)
    }

    pub fn planning(id: impl Into<ItemId>) -> Self {
        Self::new(id, ItemType::Planning)
    }

    /// An assignment in the `assigned` state, assigned to `user`.
    pub fn assignment(id: impl Into<ItemId>, user: impl Into<UserId>) -> Self {
        let mut item = Self::new(id, ItemType::Assignment);
        item.assignment_state = Some(AssignmentState::Assigned);
        item.assigned_user = Some(user.into());
        item
    }

    pub fn with_state(mut self, state: WorkflowState) -> Self {
        self.state = state;
        self
    }

    pub fn with_pubstatus(mut self, pubstatus: PostStatus) -> Self {
        self.pubstatus = Some(pubstatus);
        self
    }

    pub fn with_recurrence(mut self, recurrence_id: impl Into<ItemId>) -> Self {
        self.recurrence_id = Some(recurrence_id.into());
        self
    }

    pub fn with_related_event(mut self, event_id: impl Into<ItemId>) -> Self {
        self.related_event_ids.push(event_id.into());
        self
    }

    pub fn with_lock_stamp(
        mut self,
        user: impl Into<UserId>,
        session: impl Into<SessionId>,
    ) -> Self {
        self.lock_user = Some(user.into());
        self.lock_session = Some(session.into());
        self
    }

    pub fn with_assignment_state(mut self, state: AssignmentState) -> Self {
        self.assignment_state = Some(state);
        self
    }

    pub fn expired(mut self) -> Self {
        self.expired = true;
        self
    }

    /// `true` once the item has been posted and not since unposted.
    pub fn is_posted(&self) -> bool {
        self.pubstatus == Some(PostStatus::Usable)
    }

    pub fn has_related_events(&self) -> bool {
        !self.related_event_ids.is_empty()
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_user.as_deref() == Some(user_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_accepts_recurring_series_alias() {
        let parsed: ItemType = serde_json::from_str(r#""recurring-series""#).unwrap();
        assert_eq!(parsed, ItemType::Recurring);

        let parsed: ItemType = serde_json::from_str(r#""recurring""#).unwrap();
        assert_eq!(parsed, ItemType::Recurring);
    }

    #[test]
    fn test_item_deserializes_with_defaults() {
        let item: Item = serde_json::from_str(r#"{"id": "p1", "type": "planning"}"#).unwrap();
        assert_eq!(item.id, "p1");
        assert_eq!(item.item_type, ItemType::Planning);
        assert_eq!(item.state, WorkflowState::Draft);
        assert!(item.related_event_ids.is_empty());
        assert!(!item.expired);
        assert!(item.lock_user.is_none());
    }

    #[test]
    fn test_item_deserializes_full_planning_payload() {
        let item: Item = serde_json::from_str(
            r#"{
                "id": "p2",
                "type": "planning",
                "state": "postponed",
                "pubstatus": "usable",
                "recurrence_id": "r1",
                "related_event_ids": ["e1", "e2"],
                "expired": true
            }"#,
        )
        .unwrap();
        assert_eq!(item.state, WorkflowState::Postponed);
        assert!(item.is_posted());
        assert_eq!(item.recurrence_id.as_deref(), Some("r1"));
        assert_eq!(item.related_event_ids, vec!["e1", "e2"]);
        assert!(item.expired);
    }

    #[test]
    fn test_item_without_type_is_rejected() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_assignment_state_snake_case() {
        let parsed: AssignmentState = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(parsed, AssignmentState::InProgress);
    }

    #[test]
    fn test_terminal_states() {
        use WorkflowState::*;
        for state in [Killed, Cancelled, Rescheduled, Spiked] {
            assert!(state.is_terminal(), "{state:?}");
        }
        for state in [Draft, Active, Ingested, Scheduled, Postponed] {
            assert!(!state.is_terminal(), "{state:?}");
        }
    }

    #[test]
    fn test_withheld_is_not_posted() {
        let item = Item::event("e1").with_pubstatus(PostStatus::Withheld);
        assert!(!item.is_posted());
    }

    #[test]
    fn test_assignment_builder() {
        let item = Item::assignment("a1", "u1");
        assert_eq!(item.item_type, ItemType::Assignment);
        assert_eq!(item.assignment_state, Some(AssignmentState::Assigned));
        assert!(item.is_assigned_to("u1"));
        assert!(!item.is_assigned_to("u2"));
    }
}
