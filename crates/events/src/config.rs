//! Lock synchronisation settings loaded from the environment.

use crate::error::EventsError;

/// Default buffer capacity for the lock bus.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Settings for [`LockBus`](crate::bus::LockBus) and
/// [`LockDispatcher`](crate::dispatcher::LockDispatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSyncConfig {
    /// Messages buffered per subscriber before slow readers lag.
    pub bus_capacity: usize,
    /// Tear the lock table down after a lag so the host must re-fetch a
    /// snapshot instead of trusting a table with missed transitions.
    pub snapshot_on_lag: bool,
}

impl LockSyncConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `LOCK_BUS_CAPACITY`    | `1024`  |
    /// | `LOCK_SNAPSHOT_ON_LAG` | `true`  |
    pub fn from_env() -> Result<Self, EventsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EventsError> {
        let bus_capacity = match lookup("LOCK_BUS_CAPACITY") {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_BUS_CAPACITY,
        };

        let snapshot_on_lag = match lookup("LOCK_SNAPSHOT_ON_LAG") {
            Some(raw) => parse_flag("LOCK_SNAPSHOT_ON_LAG", &raw)?,
            None => true,
        };

        Ok(Self {
            bus_capacity,
            snapshot_on_lag,
        })
    }
}

impl Default for LockSyncConfig {
    fn default() -> Self {
        Self {
            bus_capacity: DEFAULT_BUS_CAPACITY,
            snapshot_on_lag: true,
        }
    }
}

fn parse_capacity(raw: &str) -> Result<usize, EventsError> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(EventsError::Config(format!(
            "LOCK_BUS_CAPACITY must be a positive integer, got '{raw}'"
        ))),
        Ok(capacity) => Ok(capacity),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, EventsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(EventsError::Config(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
