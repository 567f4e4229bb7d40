//! Append-only visit log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The client keeps at most this many visits in its local mirror, and
/// the read APIs cap result sets at the same bound. The durable store
/// itself retains unbounded history.
pub const VISITOR_CAP: usize = 1000;

pub const DIRECT_REFERRER: &str = "Direct";

/// One page visit. `ip_address` is assigned server-side and is empty on
/// records that never reached the durable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default = "default_referrer")]
    pub referrer: String,
    pub page: String,
    #[serde(default)]
    pub ip_address: String,
}

fn default_referrer() -> String {
    DIRECT_REFERRER.to_string()
}
