use thiserror::Error;

use crate::AttributeType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute '{name}' is registered as {registered}, cannot register it as {requested}")]
    Conflict {
        name:       String,
        registered: AttributeType,
        requested:  AttributeType,
    },

    #[error("attribute '{name}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        name:     String,
        expected: AttributeType,
        actual:   AttributeType,
    },

    #[error("attribute '{0}' is not registered")]
    Unregistered(String),
}

pub type Result<T> = std::result::Result<T, AttributeError>;
