use thiserror::Error;
use varsel_schema::SchemaError;

/// Failure of the selection machinery itself.
///
/// Not finding a variant, or finding several, is an ordinary
/// [`Selection`](crate::Selection) and never an error.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("candidate index {index} is out of range for {len} candidates")]
    CandidateOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SelectError>;
