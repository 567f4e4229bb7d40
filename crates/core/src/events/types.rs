use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after successful writes, for admin-panel live views
/// and future reconciliation hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FunnelEvent {
    ContentSaved {
        section: String,
        timestamp: DateTime<Utc>,
    },
    LeadCaptured {
        id: String,
        source: String,
        timestamp: DateTime<Utc>,
    },
    VisitorRecorded {
        id: String,
        page: String,
        timestamp: DateTime<Utc>,
    },
}
