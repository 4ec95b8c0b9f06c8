//! Action eligibility.
//!
//! Each item type has a declarative [`catalog`] of possible actions. The
//! [`resolver`] filters a catalog down to the actions that are legal right
//! now for a given item, session, privilege set and lock table.

pub mod assignment;
pub mod catalog;
pub mod event;
pub mod planning;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{
    catalog_for, find_descriptor, ActionContext, ActionDescriptor, ActionName, Predicate,
};
pub use resolver::{resolve_actions, ActionCallback, Callbacks, ResolvedAction};
