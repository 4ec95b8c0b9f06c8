//! Action rules for events.
//!
//! [`CATALOG`] order is the menu display order.

use crate::actions::catalog::{ActionContext, ActionDescriptor, ActionName};
use crate::item::WorkflowState::{self, *};
use crate::session::privileges::{
    EVENT_MANAGEMENT, EVENT_POST, PLANNING_MANAGEMENT, SPIKE_EVENT, UNSPIKE_EVENT,
};

const EDITABLE: &[WorkflowState] = &[Draft, Ingested, Scheduled, Postponed];
const RETIMABLE: &[WorkflowState] = &[Draft, Ingested, Scheduled];
const RESCHEDULABLE: &[WorkflowState] = &[Draft, Scheduled, Postponed];
const POSTPONABLE: &[WorkflowState] = &[Draft, Scheduled];
const POSTABLE: &[WorkflowState] = &[Draft, Scheduled, Postponed];
const CANCELLABLE: &[WorkflowState] = &[Draft, Active, Ingested, Scheduled, Postponed];

pub const CATALOG: &[ActionDescriptor] = &[
    ActionDescriptor::new(ActionName::Unlock, can_unlock),
    ActionDescriptor::new(ActionName::Edit, can_edit),
    ActionDescriptor::new(ActionName::UpdateTime, can_update_time),
    ActionDescriptor::new(ActionName::Reschedule, can_reschedule),
    ActionDescriptor::new(ActionName::Postpone, can_postpone),
    ActionDescriptor::new(ActionName::ConvertToRecurring, can_convert_to_recurring),
    ActionDescriptor::new(ActionName::UpdateRepetitions, can_update_repetitions),
    ActionDescriptor::new(ActionName::CreatePlanning, can_create_planning),
    ActionDescriptor::new(ActionName::AssignToCalendar, can_assign_to_calendar),
    ActionDescriptor::new(ActionName::Post, can_post),
    ActionDescriptor::new(ActionName::Unpost, can_unpost),
    ActionDescriptor::new(ActionName::Cancel, can_cancel).with_label("Cancel event"),
    ActionDescriptor::new(ActionName::Duplicate, can_duplicate),
    ActionDescriptor::new(ActionName::Spike, can_spike),
    ActionDescriptor::new(ActionName::Unspike, can_unspike),
];

pub fn can_unlock(ctx: &ActionContext<'_>) -> bool {
    ctx.can_unlock()
}

pub fn can_edit(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(EDITABLE, EVENT_MANAGEMENT)
}

pub fn can_update_time(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(RETIMABLE, EVENT_MANAGEMENT)
}

/// Postponed events may still be given a new date.
pub fn can_reschedule(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(RESCHEDULABLE, EVENT_MANAGEMENT)
}

pub fn can_postpone(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(POSTPONABLE, EVENT_MANAGEMENT)
}

pub fn can_convert_to_recurring(ctx: &ActionContext<'_>) -> bool {
    ctx.item.recurrence_id.is_none() && ctx.can_modify(&[Draft], EVENT_MANAGEMENT)
}

pub fn can_update_repetitions(ctx: &ActionContext<'_>) -> bool {
    ctx.item.recurrence_id.is_some() && ctx.can_modify(POSTPONABLE, EVENT_MANAGEMENT)
}

pub fn can_create_planning(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(RETIMABLE, PLANNING_MANAGEMENT)
}

/// Only unlocked drafts, and posted ones only for users who may post.
pub fn can_assign_to_calendar(ctx: &ActionContext<'_>) -> bool {
    ctx.state_in(&[Draft])
        && !ctx.locked
        && ctx.has(EVENT_MANAGEMENT)
        && (!ctx.item.is_posted() || ctx.has(EVENT_POST))
        && ctx.expired_gate()
}

pub fn can_post(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.is_posted() && ctx.can_modify(POSTABLE, EVENT_POST)
}

pub fn can_unpost(ctx: &ActionContext<'_>) -> bool {
    ctx.item.is_posted() && ctx.has(EVENT_POST) && !ctx.restricted && ctx.expired_gate()
}

pub fn can_cancel(ctx: &ActionContext<'_>) -> bool {
    ctx.can_modify(CANCELLABLE, EVENT_MANAGEMENT)
}

/// Duplicating creates a new item, so it does not need the lock.
pub fn can_duplicate(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.state.is_spiked() && ctx.has(EVENT_MANAGEMENT)
}

pub fn can_spike(ctx: &ActionContext<'_>) -> bool {
    !ctx.item.state.is_spiked()
        && !ctx.item.is_posted()
        && !ctx.locked
        && ctx.has(SPIKE_EVENT)
        && ctx.expired_gate()
}

pub fn can_unspike(ctx: &ActionContext<'_>) -> bool {
    ctx.item.state.is_spiked() && !ctx.locked && ctx.has(UNSPIKE_EVENT)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
