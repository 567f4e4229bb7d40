use std::collections::BTreeMap;

use serde_json::{json, Value};

use funnel_core::content::{Section, SiteContent};
use funnel_core::error::{CaptureError, SyncError};

use crate::remote::ApiClient;

/// The boundary between the content store and the durable store.
///
/// `pull` tolerates partial corruption (one bad section never aborts the
/// fetch) and `push` is an idempotent per-section upsert, last writer
/// wins, so either side may be retried freely after `Unavailable`.
#[derive(Debug, Clone)]
pub struct ContentSyncGateway {
    api: ApiClient,
}

impl ContentSyncGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch all sections and rebuild a total document. Sections that
    /// are missing or fail to decode come back as defaults; unknown
    /// section keys from the store are dropped with a warning.
    pub async fn pull(&self) -> Result<SiteContent, SyncError> {
        let raw: BTreeMap<String, Value> =
            self.api.get_json("/content").await.map_err(into_sync)?;

        let mut sections = BTreeMap::new();
        for (name, value) in raw {
            match name.parse::<Section>() {
                Ok(section) => {
                    sections.insert(section, value);
                }
                Err(_) => {
                    tracing::warn!(section = %name, "ignoring unknown section from durable store");
                }
            }
        }
        Ok(SiteContent::from_sections(sections))
    }

    /// Upsert the whole document, one `{section, content}` write per
    /// section under the fixed section key.
    pub async fn push(&self, content: &SiteContent) -> Result<(), SyncError> {
        for section in Section::ALL {
            let body = json!({
                "section": section.as_str(),
                "content": content.section_value(section),
            });
            self.api
                .post_json("/content", &body)
                .await
                .map_err(into_sync)?;
        }
        Ok(())
    }
}

fn into_sync(err: CaptureError) -> SyncError {
    match err {
        CaptureError::Sync(err) => err,
        other => SyncError::Rejected(other.to_string()),
    }
}
