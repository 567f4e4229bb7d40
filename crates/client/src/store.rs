use std::sync::{Arc, RwLock};

use thiserror::Error;

use funnel_core::content::{EditingBuffer, SiteContent};
use funnel_core::error::SyncError;

use crate::cache::LocalCache;
use crate::gateway::ContentSyncGateway;

/// A failed commit. The buffer comes back to the caller so the edit can
/// be retried without re-entering anything; the store's current document
/// and cache are untouched.
#[derive(Debug, Error)]
#[error("commit failed: {error}")]
pub struct CommitError {
    pub buffer: EditingBuffer,
    #[source]
    pub error: SyncError,
}

/// Owner of the canonical content document across its three tiers:
/// durable store (via the gateway), local cache, and the in-memory
/// current copy handed to renderers.
///
/// The current document is an `Arc` swapped wholesale, so a reader
/// always holds a complete, consistent document; there is no moment at
/// which some sections are new and others stale.
#[derive(Debug)]
pub struct ContentStore {
    gateway: ContentSyncGateway,
    cache: LocalCache,
    current: RwLock<Arc<SiteContent>>,
}

impl ContentStore {
    pub fn new(gateway: ContentSyncGateway, cache: LocalCache) -> Self {
        Self {
            gateway,
            cache,
            current: RwLock::new(Arc::new(SiteContent::default())),
        }
    }

    /// Load the document. Never fails: a successful pull refreshes the
    /// cache; an unreachable or misbehaving store falls back to the
    /// cached copy, and a cold cache falls back to the defaults.
    pub async fn load(&self) -> Arc<SiteContent> {
        let content = match self.gateway.pull().await {
            Ok(content) => {
                self.cache.store_content(&content);
                content
            }
            Err(err) => {
                tracing::warn!(%err, "content pull failed, serving local fallback");
                self.cache.load_content().unwrap_or_default()
            }
        };
        self.replace_current(content)
    }

    /// The document renderers should paint right now.
    pub fn current(&self) -> Arc<SiteContent> {
        self.current
            .read()
            .expect("content lock poisoned")
            .clone()
    }

    /// Deep-copied editing buffer over the current document.
    pub fn begin_edit(&self) -> EditingBuffer {
        self.current().begin_edit()
    }

    /// Push the edited document to the durable store. On success the
    /// cache and current document are replaced together; on failure the
    /// buffer is handed back for retry and nothing else changes.
    pub async fn commit(&self, buffer: EditingBuffer) -> Result<Arc<SiteContent>, CommitError> {
        let content = buffer.clone().into_content();
        if let Err(error) = self.gateway.push(&content).await {
            return Err(CommitError { buffer, error });
        }
        self.cache.store_content(&content);
        Ok(self.replace_current(content))
    }

    fn replace_current(&self, content: SiteContent) -> Arc<SiteContent> {
        let content = Arc::new(content);
        *self.current.write().expect("content lock poisoned") = content.clone();
        content
    }
}
