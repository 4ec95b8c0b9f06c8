//! Lock tracking and action eligibility for newsroom planning items.
//!
//! - [`locks::store`]: the lock table and its reducer.
//! - [`locks::query`]: "is this item locked, by whom, and does that stop me?"
//! - [`actions`]: declarative per-type action catalogs and the resolver that
//!   turns them into the menu an editor may use right now.
//!
//! Everything here is synchronous and side-effect free apart from `tracing`
//! diagnostics. Feeding real-time notifications into the store is the job of
//! the `planning-events` crate.

pub mod actions;
pub mod error;
pub mod item;
pub mod locks;
pub mod session;
pub mod types;

pub use actions::{resolve_actions, ActionName, ResolvedAction};
pub use error::CoreError;
pub use item::{Item, ItemType, WorkflowState};
pub use locks::{get_lock, is_lock_restricted, is_locked, is_mine, reduce, LockStore};
pub use session::{Privileges, Session};
