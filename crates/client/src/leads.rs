use chrono::Utc;

use funnel_core::error::{CaptureError, SyncError};
use funnel_core::id;
use funnel_core::lead::{is_valid_email, LeadSource, Subscriber};

use crate::cache::LocalCache;
use crate::remote::ApiClient;

/// Records email-capture events into the subscriber ledger.
///
/// Capture must never block the funnel on backend availability: when
/// the durable store is unreachable the record is buffered locally and
/// the caller still gets a success, with [`LeadCapture::pending`]
/// exposing the buffered records for later reconciliation.
#[derive(Debug, Clone)]
pub struct LeadCapture {
    api: ApiClient,
    cache: LocalCache,
}

impl LeadCapture {
    pub fn new(api: ApiClient, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Validate and persist one capture. `InvalidEmail` is returned
    /// before anything is written anywhere; `DuplicateId` means the
    /// durable store already holds this id (per-id uniqueness, not
    /// per-email).
    pub async fn submit(
        &self,
        email: &str,
        source: LeadSource,
        quiz_answers: Option<Vec<u32>>,
    ) -> Result<String, CaptureError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(CaptureError::InvalidEmail(email.to_string()));
        }

        let now = Utc::now();
        let subscriber = Subscriber {
            id: id::generate(now),
            email: email.to_string(),
            source,
            timestamp: now,
            quiz_answers,
        };

        match self.api.post_json("/emails", &subscriber).await {
            Ok(_) => Ok(subscriber.id),
            Err(CaptureError::DuplicateId(_)) => Err(CaptureError::DuplicateId(subscriber.id)),
            Err(CaptureError::Sync(SyncError::Unavailable(err))) => {
                tracing::warn!(%err, source = source.as_str(), "durable store unreachable, buffering lead locally");
                self.cache.append_email(&subscriber);
                Ok(subscriber.id)
            }
            Err(other) => Err(other),
        }
    }

    /// Leads buffered locally while the durable store was down, newest
    /// first. A reconciliation pass replays these once the store is
    /// reachable again.
    pub fn pending(&self) -> Vec<Subscriber> {
        self.cache.emails()
    }

    /// Current subscriber list from the durable store, falling back to
    /// the local buffer when the store is unreachable.
    pub async fn list(&self) -> Vec<Subscriber> {
        match self.api.get_json("/emails").await {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(%err, "email list fetch failed, serving local buffer");
                self.cache.emails()
            }
        }
    }

    /// Admin-side delete by id. When the store is unreachable the local
    /// buffer is filtered instead.
    pub async fn delete(&self, id: &str) -> Result<(), CaptureError> {
        match self.api.delete(&format!("/emails/{id}")).await {
            Ok(()) => {
                self.cache.remove_email(id);
                Ok(())
            }
            Err(CaptureError::Sync(SyncError::Unavailable(err))) => {
                tracing::warn!(%err, id, "durable store unreachable, removing from local buffer only");
                self.cache.remove_email(id);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}
