//! Action rules for planning items.
//!
//! A planning item linked to events follows its events' lifecycle: it cannot
//! be postponed, rescheduled or cancelled on its own, and it is locked
//! whenever one of its events (or their series) is locked.

use crate::actions::catalog::{ActionContext, ActionDescriptor, ActionName};
use crate::item::WorkflowState::{self, *};
use crate::session::privileges::{
    EVENT_MANAGEMENT, PLANNING_MANAGEMENT, PLANNING_POST, SPIKE_PLANNING, UNSPIKE_PLANNING,
};

const EDITABLE: &[WorkflowState] = &[Draft, Ingested, Scheduled, Postponed];
const POSTPONABLE: &[WorkflowState] = &[Draft, Scheduled];
const RESCHEDULABLE: &[WorkflowState] = &[Draft, Scheduled, Postponed];
const CANCELLABLE: &[WorkflowState] = &[Draft, Active, Scheduled, Postponed];

pub const CATALOG: &[ActionDescriptor] = &[
    ActionDescriptor::new(ActionName::Unlock, can_unlock),
    ActionDescriptor::new(ActionName::Edit, can_edit),
    ActionDescriptor::new(ActionName::AddAsEvent, can_add_as_event),
    ActionDescriptor::new(ActionName::Postpone, can_postpone),
    ActionDescriptor::new(ActionName::Reschedule, can_reschedule),
    ActionDescriptor::new(ActionName::Cancel, can_cancel).with_label("Cancel planning"),
    ActionDescriptor::new(ActionName::Post, can_post),
    ActionDescriptor::new(ActionName::Unpost, can_unpost),
    ActionDescriptor::new(ActionName::Duplicate, can_duplicate),
    ActionDescriptor::new(ActionName::Spike, can_spike),
    ActionDescriptor::new(ActionName::Unspike, can_unspike),
];

pub fn can_unlock(ctx: &ActionContext<'_>) -> bool {
    ctx.can_unlock()
}

pub fn can_edit(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(EDITABLE, PLANNING_MANAGEMENT)
}

pub fn can_add_as_event(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.has_related_events() && ctx.can_modify(POSTPONABLE, EVENT_MANAGEMENT)
}

pub fn can_postpone(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.has_related_events() && ctx.can_modify(POSTPONABLE, PLANNING_MANAGEMENT)
}

pub fn can_reschedule(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.has_related_events() && ctx.can_modify(RESCHEDULABLE, PLANNING_MANAGEMENT)
}

pub fn can_cancel(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.has_related_events() && ctx.can_modify(CANCELLABLE, PLANNING_MANAGEMENT)
}

pub fn can_post(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.is_posted() && ctx.can_modify(RESCHEDULABLE, PLANNING_POST)
}

pub fn can_unpost(ctx: &ActionContext<'_>) -> bool {
    ctx.item.is_posted() && ctx.has(PLANNING_POST) && !ctx.restricted && ctx.expired_gate()
}

/// Ignores locks: the copy is a new, unlocked item.
pub fn can_duplicate(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.state.is_spiked() && ctx.has(PLANNING_MANAGEMENT)
}

pub fn can_spike(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.state.is_spiked()
        && !ctx.item.is_posted()
        && !ctx.locked
        && ctx.has(SPIKE_PLANNING)
        && ctx.expired_gate()
}

pub fn can_unspike(ctx: &ActionContext<'_>) -> bool {
    ctx.item.state.is_spiked() && !ctx.locked && ctx.has(UNSPIKE_PLANNING)
}
