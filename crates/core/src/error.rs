/// Errors raised while decoding lock store input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
