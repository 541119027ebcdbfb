use thiserror::Error;
use varsel_attr::{AttributeError, AttributeType};

/// Error raised by a user supplied rule.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("attribute '{0}' appears more than once in the precedence list")]
    DuplicatePrecedence(String),

    #[error("disambiguation rule for '{attribute}' returned no values for {candidates} candidate values")]
    EmptyDisambiguation { attribute: String, candidates: usize },

    #[error("rule for attribute '{attribute}' failed")]
    Rule {
        attribute: String,
        #[source]
        source:    BoxError,
    },

    #[error("value '{value}' of attribute '{attribute}' is not a valid {kind}")]
    InvalidValue {
        attribute: String,
        value:     String,
        kind:      AttributeType,
    },

    #[error("invalid schema config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
