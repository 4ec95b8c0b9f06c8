use planning_core::CoreError;

/// Errors raised while decoding or configuring lock synchronisation.
#[derive(Debug, thiserror::Error)]
pub enum EventsError {
    /// A decoded message failed the core's validation rules.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The wire payload was not a valid lock message.
    #[error("Malformed lock message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
