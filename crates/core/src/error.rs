use thiserror::Error;

use crate::content::Section;

/// Errors produced by editing-buffer operations. All of these are local
/// validation failures, surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("section '{0}' is a list section, not an object")]
    NotAnObjectSection(Section),

    #[error("section '{0}' is not a list section")]
    NotAnArraySection(Section),

    #[error("index {index} out of range for section '{section}'")]
    IndexOutOfRange { section: Section, index: usize },
}

/// Errors from the durable store boundary.
///
/// `Unavailable` covers transport faults (timeout, refused connection,
/// 5xx) and is safe to retry since every operation is idempotent.
/// `Rejected` means the store understood the request and refused it;
/// retrying the same payload will fail the same way.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("durable store unavailable: {0}")]
    Unavailable(String),

    #[error("durable store rejected the request: {0}")]
    Rejected(String),
}

impl SyncError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Unavailable(_))
    }
}

/// Errors from the capture paths (lead submission, visitor recording).
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The durable store already holds a record with this id. Uniqueness
    /// is per-id, not per-email; see the `emails` schema.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_retryable() {
        assert!(SyncError::Unavailable("timeout".into()).is_retryable());
        assert!(!SyncError::Rejected("bad payload".into()).is_retryable());
    }
}
