use chrono::Utc;

use funnel_core::error::{CaptureError, SyncError};
use funnel_core::id;
use funnel_core::visitor::{Visitor, DIRECT_REFERRER, VISITOR_CAP};

use crate::cache::LocalCache;
use crate::remote::ApiClient;

/// Append-only log of page visits with the same fallback-success policy
/// as lead capture. Every visit lands in the capped local mirror
/// regardless of whether the durable store was reachable.
#[derive(Debug, Clone)]
pub struct VisitorLedger {
    api: ApiClient,
    cache: LocalCache,
}

impl VisitorLedger {
    pub fn new(api: ApiClient, cache: LocalCache) -> Self {
        Self { api, cache }
    }

    /// Record one visit. The server assigns the IP address; the local
    /// mirror keeps it empty.
    pub async fn record(
        &self,
        page: &str,
        user_agent: &str,
        referrer: Option<&str>,
    ) -> Result<String, CaptureError> {
        let now = Utc::now();
        let visitor = Visitor {
            id: id::generate(now),
            timestamp: now,
            user_agent: user_agent.to_string(),
            referrer: referrer
                .filter(|r| !r.is_empty())
                .unwrap_or(DIRECT_REFERRER)
                .to_string(),
            page: page.to_string(),
            ip_address: String::new(),
        };

        // The mirror is written first and kept whatever the store says.
        self.cache.append_visitor(&visitor);

        match self.api.post_json("/visitors", &visitor).await {
            Ok(_) => Ok(visitor.id),
            Err(CaptureError::Sync(SyncError::Unavailable(err))) => {
                tracing::warn!(%err, page, "durable store unreachable, visit kept in local mirror");
                Ok(visitor.id)
            }
            Err(other) => Err(other),
        }
    }

    /// Most-recent-first visit log from the durable store, falling back
    /// to the local mirror when the store is unreachable. Optionally
    /// filtered by page, capped at 1000.
    pub async fn query(&self, page: Option<&str>, limit: usize) -> Vec<Visitor> {
        let visitors = match self.api.get_json("/visitors").await {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(%err, "visitor list fetch failed, serving local mirror");
                self.cache.visitors()
            }
        };
        filter_visits(visitors, page, limit)
    }

    /// The local mirror alone, same filtering, for offline views.
    pub fn mirrored(&self, page: Option<&str>, limit: usize) -> Vec<Visitor> {
        filter_visits(self.cache.visitors(), page, limit)
    }
}

fn filter_visits(visitors: Vec<Visitor>, page: Option<&str>, limit: usize) -> Vec<Visitor> {
    let limit = limit.min(VISITOR_CAP);
    visitors
        .into_iter()
        .filter(|v| page.is_none_or(|p| v.page == p))
        .take(limit)
        .collect()
}
