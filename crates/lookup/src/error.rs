use thiserror::Error;

/// Failure reported by an element lookup collaborator or by the helpers
/// built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no element matches `{query}`")]
    NotFound { query: String },
    #[error("expected {expected} but found {found}")]
    UnexpectedElement { expected: String, found: String },
    #[error("driver failure: {0}")]
    Driver(String),
    #[error("script returned {value}, expected {expected}")]
    ScriptResult { value: String, expected: &'static str },
}

impl LookupError {
    pub fn driver(message: impl Into<String>) -> Self {
        LookupError::Driver(message.into())
    }
}
