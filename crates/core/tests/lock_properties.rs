//! Integration tests for the lock table and action resolution.
//!
//! These drive the public API the way a host application does: feed
//! notifications through `reduce`, then ask lock questions and resolve
//! menus against the resulting store.

use std::collections::HashMap;

use planning_core::actions::{catalog_for, resolve_actions, ActionName, ResolvedAction};
use planning_core::item::{Item, ItemType, WorkflowState};
use planning_core::locks::{
    get_lock, is_lock_restricted, is_locked, is_mine, lock_actions, reduce, LockNotification,
    LockStore, LockStoreAction,
};
use planning_core::session::{privileges, Privileges, Session};

fn empty_store() -> Option<LockStore> {
    reduce(None, LockStoreAction::Init)
}

fn lock(data: LockNotification) -> LockStoreAction {
    LockStoreAction::ItemLocked(data)
}

fn unlock(data: LockNotification) -> LockStoreAction {
    LockStoreAction::ItemUnlocked(data)
}

fn callbacks() -> HashMap<ActionName, &'static str> {
    ActionName::ALL
        .iter()
        .map(|name| (*name, name.label()))
        .collect()
}

fn menu(item: &Item, session: &Session, privs: &Privileges, store: &LockStore) -> Vec<ActionName> {
    let resolved: Vec<ResolvedAction<&'static str>> = resolve_actions(
        Some(item),
        &[],
        session,
        privs,
        Some(store),
        catalog_for(item.item_type),
        &callbacks(),
    );
    resolved.iter().map(|a| a.action_name).collect()
}

// ---------------------------------------------------------------------------
// Test: unlocking twice is the same as unlocking once
// ---------------------------------------------------------------------------

#[test]
fn unlock_is_idempotent() {
    let state = reduce(
        empty_store(),
        lock(LockNotification::new("e1", ItemType::Event, "u1", "s1", lock_actions::EDIT)),
    );
    let target = LockNotification::unlock("e2", ItemType::Event);

    let once = reduce(state.clone(), unlock(target.clone()));
    let twice = reduce(once.clone(), unlock(target.clone()));
    assert_eq!(once, twice);

    let target = LockNotification::unlock("e1", ItemType::Event);
    let once = reduce(state, unlock(target.clone()));
    let twice = reduce(once.clone(), unlock(target));
    assert_eq!(once, twice);
    assert_eq!(once, empty_store());
}

// ---------------------------------------------------------------------------
// Test: lock then unlock round-trips for every item type
// ---------------------------------------------------------------------------

#[test]
fn lock_unlock_round_trip() {
    for item_type in [ItemType::Event, ItemType::Planning, ItemType::Assignment] {
        let item = Item::new("x1", item_type);
        let locked = reduce(
            empty_store(),
            lock(LockNotification::new("x1", item_type, "u1", "s1", lock_actions::EDIT)),
        );
        assert!(is_locked(Some(&item), locked.as_ref()), "{item_type} not locked");

        let released = reduce(locked, unlock(LockNotification::unlock("x1", item_type)));
        assert!(!is_locked(Some(&item), released.as_ref()), "{item_type} still locked");
    }
}

// ---------------------------------------------------------------------------
// Test: a series lock reaches its events and their planning items
// ---------------------------------------------------------------------------

#[test]
fn series_lock_propagates_to_event_and_planning() {
    let event = Item::event("E").with_recurrence("R");
    let planning = Item::planning("P")
        .with_related_event("E")
        .with_recurrence("R");

    let store = reduce(
        empty_store(),
        lock(
            LockNotification::new("E9", ItemType::Event, "u2", "s2", lock_actions::RESCHEDULE)
                .with_recurrence("R"),
        ),
    )
    .unwrap();

    assert!(store.event.is_empty());
    assert!(store.planning.is_empty());
    assert!(is_locked(Some(&event), Some(&store)));
    assert!(is_locked(Some(&planning), Some(&store)));
    assert_eq!(
        get_lock(Some(&planning), Some(&store)).map(|l| l.action),
        Some(lock_actions::RESCHEDULE.to_string())
    );
}

// ---------------------------------------------------------------------------
// Test: an event lock reaches planning items linked to it
// ---------------------------------------------------------------------------

#[test]
fn event_lock_propagates_to_linked_planning() {
    let planning = Item::planning("P").with_related_event("E");
    let store = reduce(
        empty_store(),
        lock(
            LockNotification::new("P", ItemType::Planning, "u2", "s2", lock_actions::EDIT)
                .with_event_item("E"),
        ),
    )
    .unwrap();

    assert!(is_locked(Some(&planning), Some(&store)));
    assert!(is_locked(Some(&Item::event("E")), Some(&store)));
}

// ---------------------------------------------------------------------------
// Test: spike and unspike are never offered together
// ---------------------------------------------------------------------------

#[test]
fn spike_and_unspike_mutually_exclusive() {
    let privs = Privileges::granted([
        privileges::SPIKE_EVENT,
        privileges::UNSPIKE_EVENT,
        privileges::SPIKE_PLANNING,
        privileges::UNSPIKE_PLANNING,
        privileges::EVENT_MANAGEMENT,
        privileges::PLANNING_MANAGEMENT,
    ]);
    let session = Session::new("u1", "s1");
    let store = empty_store().unwrap();

    for item_type in [ItemType::Event, ItemType::Planning] {
        for state in [
            WorkflowState::Draft,
            WorkflowState::Scheduled,
            WorkflowState::Postponed,
            WorkflowState::Cancelled,
            WorkflowState::Spiked,
        ] {
            let item = Item::new("x", item_type).with_state(state);
            let actions = menu(&item, &session, &privs, &store);
            let spike = actions.contains(&ActionName::Spike);
            let unspike = actions.contains(&ActionName::Unspike);
            assert!(!(spike && unspike), "{item_type} {state:?}");
            assert_eq!(unspike, state == WorkflowState::Spiked);
        }
    }
}

// ---------------------------------------------------------------------------
// Test: duplicate survives another user's lock, edit does not
// ---------------------------------------------------------------------------

#[test]
fn duplicate_ignores_restriction() {
    let privs = Privileges::granted([privileges::EVENT_MANAGEMENT]);
    let event = Item::event("e1");
    let store = reduce(
        empty_store(),
        lock(LockNotification::new("e1", ItemType::Event, "u2", "s2", lock_actions::EDIT)),
    )
    .unwrap();
    let session = Session::new("u1", "s1");

    assert!(is_lock_restricted(Some(&event), &session, Some(&store)));
    let actions = menu(&event, &session, &privs, &store);
    assert!(actions.contains(&ActionName::Duplicate));
    assert!(!actions.contains(&ActionName::Edit));
}

// ---------------------------------------------------------------------------
// Test: the locker keeps Edit, everyone else gets Duplicate only
// ---------------------------------------------------------------------------

#[test]
fn planning_lock_owner_versus_other_user() {
    let privs = Privileges::granted([privileges::PLANNING_MANAGEMENT]);
    let store = reduce(
        empty_store(),
        lock(LockNotification::new("p1", ItemType::Planning, "u1", "s1", lock_actions::EDIT)),
    )
    .unwrap();
    let planning: Item =
        serde_json::from_str(r#"{"id": "p1", "type": "planning", "state": "draft"}"#).unwrap();

    let owner = Session::new("u1", "s1");
    let lock = get_lock(Some(&planning), Some(&store));
    assert!(is_mine(lock.as_ref(), &owner));
    let actions = menu(&planning, &owner, &privs, &store);
    assert!(actions.contains(&ActionName::Edit));

    let other = Session::new("u2", "s2");
    assert!(!is_mine(lock.as_ref(), &other));
    let actions = menu(&planning, &other, &privs, &store);
    assert!(!actions.contains(&ActionName::Edit));
    assert!(actions.contains(&ActionName::Duplicate));
}

// ---------------------------------------------------------------------------
// Test: RESET tears down, INIT rebuilds the empty store
// ---------------------------------------------------------------------------

#[test]
fn reset_then_init() {
    let state = reduce(
        empty_store(),
        lock(LockNotification::new("a1", ItemType::Assignment, "u1", "s1", lock_actions::EDIT)),
    );
    let state = reduce(state, LockStoreAction::Reset);
    assert!(state.is_none());

    let state = reduce(state, LockStoreAction::Init);
    assert_eq!(state, Some(LockStore::default()));
}

// ---------------------------------------------------------------------------
// Test: expired items need the edit-expired privilege
// ---------------------------------------------------------------------------

#[test]
fn expired_item_needs_edit_expired() {
    let event = Item::event("e1").expired();
    let store = empty_store().unwrap();
    let session = Session::new("u1", "s1");
    let base = Privileges::granted([privileges::EVENT_MANAGEMENT]);

    let actions = menu(&event, &session, &base.clone().revoke(privileges::EDIT_EXPIRED), &store);
    assert!(!actions.contains(&ActionName::AssignToCalendar));

    let actions = menu(&event, &session, &base.grant(privileges::EDIT_EXPIRED), &store);
    assert!(actions.contains(&ActionName::AssignToCalendar));
}

// ---------------------------------------------------------------------------
// Test: nothing is resolved for a missing item
// ---------------------------------------------------------------------------

#[test]
fn missing_item_resolves_to_empty_menu() {
    let actions: Vec<ResolvedAction<&'static str>> = resolve_actions(
        None,
        &[],
        &Session::new("u1", "s1"),
        &Privileges::granted([privileges::EVENT_MANAGEMENT]),
        empty_store().as_ref(),
        catalog_for(ItemType::Event),
        &callbacks(),
    );
    assert!(actions.is_empty());
    assert!(!is_locked(None, empty_store().as_ref()));
    assert!(!is_lock_restricted(None, &Session::new("u1", "s1"), empty_store().as_ref()));
}
