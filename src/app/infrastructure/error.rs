use thiserror::Error;

use crate::app::domain::{DocumentId, ViewId};

#[derive(Error, Debug)]
pub enum HexfieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with HexfieldError
pub type Result<T> = std::result::Result<T, HexfieldError>;

/// Failures reported by the host at the read/apply boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("document {0:?} is closed")]
    DocumentClosed(DocumentId),

    #[error("view {0:?} is detached")]
    ViewDetached(ViewId),

    #[error("host rejected request: {0}")]
    Rejected(String),
}

/// Every way processing can fail. None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Unparseable date inside brackets, malformed color string.
    InputMalformed,
    /// Document or view closed between the event and its handler.
    HostStateRace,
    /// Host refused an operation on a live document.
    HostRejected,
    /// A configuration key is absent or empty.
    ConfigurationMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Produce nothing for the offending input.
    Omit,
    /// Substitute the built-in default or pass the value through unchanged.
    Fallback,
    /// Drop the whole operation for this event.
    Discard,
}

impl FailureClass {
    pub fn policy(&self) -> FailurePolicy {
        match self {
            Self::InputMalformed => FailurePolicy::Omit,
            Self::ConfigurationMissing => FailurePolicy::Fallback,
            Self::HostStateRace | Self::HostRejected => FailurePolicy::Discard,
        }
    }
}

impl HostError {
    pub fn class(&self) -> FailureClass {
        match self {
            Self::DocumentClosed(_) | Self::ViewDetached(_) => FailureClass::HostStateRace,
            Self::Rejected(_) => FailureClass::HostRejected,
        }
    }
}

/// Apply the failure policy to a host result: log and discard the error.
pub fn absorb<T>(result: std::result::Result<T, HostError>, context: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug_assert_eq!(err.class().policy(), FailurePolicy::Discard);
            tracing::debug!(class = ?err.class(), error = %err, "{context}: discarded");
            None
        }
    }
}
