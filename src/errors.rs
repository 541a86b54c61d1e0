//! Error taxonomy for the storage core
//!
//! Every core component (object store, index, refs, commit graph) reports failures through
//! [`Error`]. The command layer wraps these in `anyhow` for context, and `main` inspects the
//! kind to decide the exit code: [`Error::PreconditionFailed`] is an expected user-flow outcome
//! and exits successfully, everything else aborts the command.

use thiserror::Error;

/// Result type alias using twig's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the storage core.
#[derive(Error, Debug)]
pub enum Error {
    /// A missing object, ref, or file where absence is not a valid empty state.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Decompression failure or a structurally invalid serialized record.
    #[error("corrupt object: {reason}")]
    CorruptObject { reason: String },

    /// Malformed HEAD, unexpected ref format, or an otherwise inconsistent repository.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// Underlying read/write/create failure.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// An expected outcome the user should be told about, not a crash.
    #[error("{message}")]
    PreconditionFailed { message: String },
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }

    pub fn corrupt_object(reason: impl Into<String>) -> Self {
        Error::CorruptObject {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Error::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Whether this error is an expected user-flow outcome rather than a failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::PreconditionFailed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
