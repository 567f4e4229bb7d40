use std::time::Duration;

use funnel_core::error::SyncError;

/// The single retry/fallback policy shared by the sync gateway, lead
/// capture, and the visitor ledger: one bounded timeout per request,
/// plus the classification of transport faults into retryable
/// (`Unavailable`) versus terminal (`Rejected`).
#[derive(Debug, Clone)]
pub struct FallbackPolicy {
    pub request_timeout: Duration,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FallbackPolicy {
    pub fn with_timeout(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    /// Classify a transport-level failure. Timeouts and connection
    /// faults are `Unavailable`; a body we cannot decode means the
    /// store is answering nonsense and retrying will not help.
    pub fn classify(&self, err: &reqwest::Error) -> SyncError {
        if err.is_decode() || err.is_builder() {
            SyncError::Rejected(err.to_string())
        } else {
            // Timeout, connect failure, or a dropped connection. Every
            // operation on this API is idempotent, so retry is safe.
            SyncError::Unavailable(err.to_string())
        }
    }
}
