//! Session identity and privilege grants supplied by the host application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{SessionId, UserId};

/// The logged-in user and the client session they are acting from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub session_id: SessionId,
}

impl Session {
    pub fn new(user_id: impl Into<UserId>, session_id: impl Into<SessionId>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// Well-known privilege names.
pub mod privileges {
    pub const PLANNING_MANAGEMENT: &str = "planning_management";
    pub const EVENT_MANAGEMENT: &str = "event_management";
    pub const SPIKE_PLANNING: &str = "spike_planning";
    pub const UNSPIKE_PLANNING: &str = "unspike_planning";
    pub const SPIKE_EVENT: &str = "spike_event";
    pub const UNSPIKE_EVENT: &str = "unspike_event";
    pub const EVENT_POST: &str = "event_post";
    pub const PLANNING_POST: &str = "planning_post";
    /// Required in addition to the normal gates when acting on expired items.
    pub const EDIT_EXPIRED: &str = "edit_expired";
    /// Allows releasing a lock held by another user.
    pub const PLANNING_UNLOCK: &str = "planning_unlock";
    pub const ASSIGNMENT_MANAGEMENT: &str = "assignment_management";
}

/// Named grants, `1` for granted and `0` (or absent) for denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Privileges(HashMap<String, u8>);

impl Privileges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant every named privilege.
    pub fn granted<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(|n| (n.to_string(), 1)).collect())
    }

    pub fn grant(mut self, name: &str) -> Self {
        self.0.insert(name.to_string(), 1);
        self
    }

    pub fn revoke(mut self, name: &str) -> Self {
        self.0.insert(name.to_string(), 0);
        self
    }

    /// Absent and zero-valued privileges are both denied.
    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| *v != 0)
    }
}
