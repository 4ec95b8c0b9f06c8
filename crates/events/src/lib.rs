//! Real-time lock synchronisation for the planning client.
//!
//! This crate connects the websocket feed of lock notifications to the pure
//! reducer in `planning-core`:
//!
//! - [`LockMessage`]: the wire envelope pushed by the backend.
//! - [`LockBus`]: in-process fan-out of messages over
//!   `tokio::sync::broadcast`.
//! - [`LockStoreHandle`]: shared, async-locked lock table that every reader
//!   snapshots and only the reducer writes.
//! - [`LockDispatcher`]: background task applying bus messages to the handle
//!   in arrival order.
//! - [`LockSyncConfig`]: environment-driven settings.

pub mod bus;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod message;

pub use bus::LockBus;
pub use config::LockSyncConfig;
pub use dispatcher::LockDispatcher;
pub use error::EventsError;
pub use handle::LockStoreHandle;
pub use message::LockMessage;
