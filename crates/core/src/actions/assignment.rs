//! Action rules for coverage assignments.

use crate::actions::catalog::{ActionContext, ActionDescriptor, ActionName};
use crate::item::AssignmentState::{self, *};
use crate::session::privileges::ASSIGNMENT_MANAGEMENT;

const OPEN: &[AssignmentState] = &[Assigned, Submitted, InProgress];

pub const CATALOG: &[ActionDescriptor] = &[
    ActionDescriptor::new(ActionName::Unlock, can_unlock),
    ActionDescriptor::new(ActionName::StartWorking, can_start_working),
    ActionDescriptor::new(ActionName::Complete, can_complete),
    ActionDescriptor::new(ActionName::Reassign, can_reassign),
    ActionDescriptor::new(ActionName::EditPriority, can_edit_priority),
    ActionDescriptor::new(ActionName::Remove, can_remove),
];

fn state_in(ctx: &ActionContext<'_>, states: &[AssignmentState]) -> bool {
    ctx.item
        .assignment_state
        .is_some_and(|state| states.contains(&state))
}

fn assigned_to_me(ctx: &ActionContext<'_>) -> bool {
    ctx.item.is_assigned_to(&ctx.session.user_id)
}

pub fn can_unlock(ctx: &ActionContext<'_>) -> bool {
    ctx.can_unlock()
}

pub fn can_start_working(ctx: &ActionContext<'_>) -> bool {
    state_in(ctx, &[Assigned]) && assigned_to_me(ctx) && !ctx.restricted
}

pub fn can_complete(ctx: &ActionContext<'_>) -> bool {
    state_in(ctx, &[InProgress, Submitted]) && assigned_to_me(ctx) && !ctx.restricted
}

pub fn can_reassign(ctx: &ActionContext<'_>) -> bool {
    state_in(ctx, OPEN) && ctx.has(ASSIGNMENT_MANAGEMENT) && !ctx.restricted
}

pub fn can_edit_priority(ctx: &ActionContext<'_>) -> bool {
    state_in(ctx, OPEN) && ctx.has(ASSIGNMENT_MANAGEMENT) && !ctx.restricted
}

/// Work already in progress is never removed from under its assignee.
pub fn can_remove(ctx: &ActionContext<'_>) -> bool {
    state_in(ctx, &[Assigned, Submitted]) && ctx.has(ASSIGNMENT_MANAGEMENT) && !ctx.locked
}
