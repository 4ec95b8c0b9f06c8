//! Lock questions about a single item.
//!
//! Every function here is total: a missing item or a store that is not ready
//! yields `false` / `None` rather than an error, because most call sites pass
//! optional items straight from the UI.
//!
//! Locks propagate along an item's causal chain. An event is locked when its
//! recurring series is locked, and a planning item is locked when its series
//! or any of its linked events is locked, even though the planning item itself
//! may hold no lock.

use crate::item::{Item, ItemType};
use crate::locks::store::{Lock, LockStore};
use crate::session::privileges::PLANNING_UNLOCK;
use crate::session::{Privileges, Session};

/// The lock governing `item`, if any.
///
/// Precedence mirrors how locks are keyed: series, then linked event, then
/// the item's own entry. While the store is not ready the item's
/// denormalised lock stamp is used instead; once ready the store is
/// authoritative.
pub fn get_lock(item: Option<&Item>, store: Option<&LockStore>) -> Option<Lock> {
    let item = item?;
    let Some(store) = store else {
        return stamped_lock(item);
    };

    let series = || {
        item.recurrence_id
            .as_deref()
            .and_then(|id| store.recurring.get(id))
    };

    let lock = match item.item_type {
        ItemType::Recurring => store.recurring.get(&item.id),
        ItemType::Event => series().or_else(|| store.event.get(&item.id)),
        ItemType::Planning => series()
            .or_else(|| {
                item.related_event_ids
                    .iter()
                    .find_map(|event_id| store.event.get(event_id))
            })
            .or_else(|| store.planning.get(&item.id)),
        ItemType::Assignment => store.assignment.get(&item.id),
    };
    lock.cloned()
}

/// Build a lock from the stamp an item carries about itself.
fn stamped_lock(item: &Item) -> Option<Lock> {
    let user = item.lock_user.as_deref().filter(|u| !u.is_empty())?;
    let session = item.lock_session.as_deref().filter(|s| !s.is_empty())?;
    Some(Lock {
        item_id: item.id.clone(),
        item_type: item.item_type,
        action: item.lock_action.clone().unwrap_or_default(),
        user: user.to_string(),
        session: session.to_string(),
        time: item.lock_time.unwrap_or_default(),
    })
}

/// `true` when anything in the item's chain holds a lock, including the
/// caller's own session.
pub fn is_locked(item: Option<&Item>, store: Option<&LockStore>) -> bool {
    get_lock(item, store).is_some()
}

/// `true` when the lock belongs to this user in this session.
pub fn is_mine(lock: Option<&Lock>, session: &Session) -> bool {
    lock.is_some_and(|lock| lock.is_held_by(session))
}

/// `true` when the item is locked by another user, or by this user in
/// another session.
pub fn is_lock_restricted(
    item: Option<&Item>,
    session: &Session,
    store: Option<&LockStore>,
) -> bool {
    get_lock(item, store).is_some_and(|lock| !lock.is_held_by(session))
}

pub fn is_locked_in_this_session(
    item: Option<&Item>,
    session: &Session,
    store: Option<&LockStore>,
) -> bool {
    is_mine(get_lock(item, store).as_ref(), session)
}

/// `true` when this user holds the lock from a different session (e.g.
/// another browser tab).
pub fn is_locked_by_user_elsewhere(
    item: Option<&Item>,
    session: &Session,
    store: Option<&LockStore>,
) -> bool {
    get_lock(item, store)
        .is_some_and(|lock| lock.user == session.user_id && lock.session != session.session_id)
}

pub fn get_lock_action(item: Option<&Item>, store: Option<&LockStore>) -> Option<String> {
    get_lock(item, store).map(|lock| lock.action)
}

/// The item's own lock, else the first lock found on a related item.
///
/// Related items let callers cover chains the item cannot describe on its
/// own, such as the series of a planning item's linked event.
pub fn get_chain_lock(
    item: Option<&Item>,
    related: &[Item],
    store: Option<&LockStore>,
) -> Option<Lock> {
    let item = item?;
    get_lock(Some(item), store).or_else(|| {
        related
            .iter()
            .find_map(|related_item| get_lock(Some(related_item), store))
    })
}

/// Whether the caller may release the lock on `item`.
///
/// A lock held in this very session is released by finishing the edit, not
/// through an unlock action. Otherwise the caller's own user may always
/// unlock, and anyone else needs the unlock privilege.
pub fn can_unlock(
    item: Option<&Item>,
    related: &[Item],
    session: &Session,
    privileges: &Privileges,
    store: Option<&LockStore>,
) -> bool {
    match get_chain_lock(item, related, store) {
        Some(lock) if lock.is_held_by(session) => false,
        Some(lock) => lock.user == session.user_id || privileges.has(PLANNING_UNLOCK),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
