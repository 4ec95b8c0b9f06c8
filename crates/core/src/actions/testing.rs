//! Shared fixtures for the catalog unit tests.

use std::collections::HashMap;

use crate::actions::catalog::{catalog_for, ActionName};
use crate::actions::resolver::{resolve_actions, ResolvedAction};
use crate::item::{Item, ItemType};
use crate::locks::store::{reduce, LockNotification, LockStore, LockStoreAction};
use crate::session::{Privileges, Session};

/// An edit lock on an event.
pub fn lock(id: &str, user: &str, session: &str) -> LockNotification {
    lock_on(ItemType::Event, id, user, session)
}

pub fn lock_on(item_type: ItemType, id: &str, user: &str, session: &str) -> LockNotification {
    LockNotification::new(id, item_type, user, session, "edit")
}

pub fn store(notifications: Vec<LockNotification>) -> LockStore {
    let mut state = reduce(None, LockStoreAction::Init);
    for data in notifications {
        state = reduce(state, LockStoreAction::ItemLocked(data));
    }
    state.unwrap_or_default()
}

/// A callback (its own action name) for every known action.
pub fn all_callbacks() -> HashMap<ActionName, ActionName> {
    ActionName::ALL.iter().map(|name| (*name, *name)).collect()
}

/// Resolve against the item type's built-in catalog with every callback bound.
pub fn resolve(
    item: &Item,
    related: &[Item],
    session: &Session,
    privileges: &Privileges,
    store: &LockStore,
) -> Vec<ResolvedAction<ActionName>> {
    resolve_actions(
        Some(item),
        related,
        session,
        privileges,
        Some(store),
        catalog_for(item.item_type),
        &all_callbacks(),
    )
}

pub fn names<C>(actions: &[ResolvedAction<C>]) -> Vec<ActionName> {
    actions.iter().map(|a| a.action_name).collect()
}
