//! Client-side lock tracking.
//!
//! [`store`] holds the lock table and its reducer; [`query`] answers
//! lock questions about individual items against that table.

pub mod query;
pub mod store;

pub use query::{
    can_unlock, get_chain_lock, get_lock, get_lock_action, is_lock_restricted, is_locked,
    is_locked_by_user_elsewhere, is_locked_in_this_session, is_mine,
};
pub use store::{
    lock_actions, reduce, Lock, LockNotification, LockSnapshot, LockStore, LockStoreAction,
};
