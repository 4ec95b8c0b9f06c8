//! Declarative action descriptors and the context their predicates see.

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemType, WorkflowState};
use crate::locks::query;
use crate::locks::store::{Lock, LockStore};
use crate::session::{privileges, Privileges, Session};

// ---------------------------------------------------------------------------
// Action names
// ---------------------------------------------------------------------------

/// Key identifying an action, used to look up its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    Unlock,
    Edit,
    UpdateTime,
    Reschedule,
    Postpone,
    ConvertToRecurring,
    UpdateRepetitions,
    CreatePlanning,
    AssignToCalendar,
    AddAsEvent,
    Post,
    Unpost,
    Cancel,
    Duplicate,
    Spike,
    Unspike,
    StartWorking,
    Complete,
    Reassign,
    EditPriority,
    Remove,
}

impl ActionName {
    pub const ALL: &'static [ActionName] = &[
        ActionName::Unlock,
        ActionName::Edit,
        ActionName::UpdateTime,
        ActionName::Reschedule,
        ActionName::Postpone,
        ActionName::ConvertToRecurring,
        ActionName::UpdateRepetitions,
        ActionName::CreatePlanning,
        ActionName::AssignToCalendar,
        ActionName::AddAsEvent,
        ActionName::Post,
        ActionName::Unpost,
        ActionName::Cancel,
        ActionName::Duplicate,
        ActionName::Spike,
        ActionName::Unspike,
        ActionName::StartWorking,
        ActionName::Complete,
        ActionName::Reassign,
        ActionName::EditPriority,
        ActionName::Remove,
    ];

    /// Default menu label.
    pub const fn label(&self) -> &'static str {
        match self {
            ActionName::Unlock => "Unlock",
            ActionName::Edit => "Edit",
            ActionName::UpdateTime => "Update time",
            ActionName::Reschedule => "Reschedule",
            ActionName::Postpone => "Postpone",
            ActionName::ConvertToRecurring => "Convert to recurring",
            ActionName::UpdateRepetitions => "Update repetitions",
            ActionName::CreatePlanning => "Create planning item",
            ActionName::AssignToCalendar => "Assign to calendar",
            ActionName::AddAsEvent => "Add as event",
            ActionName::Post => "Post",
            ActionName::Unpost => "Unpost",
            ActionName::Cancel => "Cancel",
            ActionName::Duplicate => "Duplicate",
            ActionName::Spike => "Spike",
            ActionName::Unspike => "Unspike",
            ActionName::StartWorking => "Start working",
            ActionName::Complete => "Complete",
            ActionName::Reassign => "Reassign",
            ActionName::EditPriority => "Edit priority",
            ActionName::Remove => "Remove",
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Eligibility rule for one action.
pub type Predicate = fn(&ActionContext<'_>) -> bool;

/// A possible user action and the rule deciding when it is offered.
///
/// A descriptor without a predicate is malformed and never eligible.
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    pub action_name: ActionName,
    pub label: &'static str,
    pub predicate: Option<Predicate>,
}

impl ActionDescriptor {
    pub const fn new(action_name: ActionName, predicate: Predicate) -> Self {
        Self {
            action_name,
            label: action_name.label(),
            predicate: Some(predicate),
        }
    }

    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn is_eligible(&self, ctx: &ActionContext<'_>) -> bool {
        self.predicate.is_some_and(|predicate| predicate(ctx))
    }
}

impl std::fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("action_name", &self.action_name)
            .field("label", &self.label)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Look up a descriptor by name. Unknown names yield `None`.
pub fn find_descriptor(
    catalog: &[ActionDescriptor],
    name: ActionName,
) -> Option<&ActionDescriptor> {
    catalog.iter().find(|d| d.action_name == name)
}

/// Built-in catalog for an item type. Series have no actions of their own.
pub fn catalog_for(item_type: ItemType) -> &'static [ActionDescriptor] {
    match item_type {
        ItemType::Event => super::event::CATALOG,
        ItemType::Planning => super::planning::CATALOG,
        ItemType::Assignment => super::assignment::CATALOG,
        ItemType::Recurring => &[],
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Everything an eligibility predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub item: &'a Item,
    /// Related items, e.g. the events a planning item is linked to.
    pub related: &'a [Item],
    pub session: &'a Session,
    pub privileges: &'a Privileges,
    pub store: Option<&'a LockStore>,
    pub lock: Option<&'a Lock>,
    /// Something in the item's chain holds a lock, possibly the caller.
    pub locked: bool,
    /// The lock belongs to someone other than this session.
    pub restricted: bool,
}

impl ActionContext<'_> {
    pub fn has(&self, privilege: &str) -> bool {
        self.privileges.has(privilege)
    }

    pub fn state_in(&self, states: &[WorkflowState]) -> bool {
        states.contains(&self.item.state)
    }

    /// Expired items additionally need the edit-expired privilege.
    pub fn expired_gate(&self) -> bool {
        !self.item.expired || self.has(privileges::EDIT_EXPIRED)
    }

    /// Shared gate for edit-class actions: allowed state, privilege, not
    /// locked by anyone else, expiry respected.
    pub fn can_modify(&self, states: &[WorkflowState], privilege: &str) -> bool {
        self.state_in(states) && self.has(privilege) && !self.restricted && self.expired_gate()
    }

    pub fn can_unlock(&self) -> bool {
        query::can_unlock(
            Some(self.item),
            self.related,
            self.session,
            self.privileges,
            self.store,
        )
    }
}
