use thiserror::Error;

use crate::model::ReferenceError;
use crate::store::StoreError;

/// Failures raised by the pipeline itself, as opposed to remote failures
/// which are surfaced unchanged.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The picker chose an index outside the listing page
    #[error("Picked index {index} is outside the listing of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// The picked listing entry has no usable identifier
    #[error("Selected reference is malformed: {source}")]
    InvalidReference {
        #[source]
        source: ReferenceError,
    },

    /// Clearing or inserting the local copy failed
    #[error("Failed to replace stored pokemon: {source}")]
    Replace {
        #[source]
        source: StoreError,
    },

    /// Reading the local copy failed
    #[error("Failed to read stored pokemon: {source}")]
    Read {
        #[source]
        source: StoreError,
    },
}
