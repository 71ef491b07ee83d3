//! Errors raised while validating relayed headers.

use causeway_bridge_primitives::{buf::Buf32, time::Timestamp};
use thiserror::Error;

/// Errors that can occur when a header is offered to the relay.
///
/// All of these reject the header before any state mutation; the relay never stores a header
/// that failed a check.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// The header's parent has not been accepted by the relay.
    #[error("parent header {0} is not known to the relay")]
    UnknownParent(Buf32),

    /// The header's identifier does not satisfy its own difficulty target.
    #[error("header {id} does not satisfy difficulty target {target}")]
    InvalidProofOfWork {
        /// The recomputed header identifier.
        id: Buf32,
        /// The target it fails to meet.
        target: Buf32,
    },

    /// The header declares an all-zero difficulty target.
    #[error("header declares a zero difficulty target")]
    ZeroTarget,

    /// The header's timestamp is not plausible against its ancestors.
    #[error("header timestamp {timestamp} does not exceed the ancestor median {median}")]
    NonMonotonicTime {
        /// The offending timestamp.
        timestamp: Timestamp,
        /// The median timestamp of the ancestor window.
        median: Timestamp,
    },

    /// The header was already accepted; re-relaying is idempotent-detectable.
    #[error("header {0} was already relayed")]
    DuplicateHeader(Buf32),
}

/// The result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
