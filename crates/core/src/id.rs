//! Time-derived record ids shared by the subscriber and visitor ledgers.

use chrono::{DateTime, Utc};

/// Opaque time-derived record id: seconds since the epoch in hex plus
/// the sub-second microseconds, thirteen lowercase hex chars (the shape
/// the legacy store already contains).
pub fn generate(now: DateTime<Utc>) -> String {
    format!(
        "{:08x}{:05x}",
        now.timestamp(),
        now.timestamp_subsec_micros()
    )
}
