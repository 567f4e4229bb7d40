//! Client SDK for the lead-funnel backend.
//!
//! Wraps the HTTP surface of `funnel-api` with the offline behavior the
//! funnel needs: content loads never fail (stale cache, then defaults),
//! and capture paths report success even when the durable store is down,
//! as long as a local record was made. All network calls share one
//! [`FallbackPolicy`] for timeouts and retryability classification.

mod cache;
mod gateway;
mod leads;
mod policy;
mod remote;
mod store;
mod visitors;

pub use cache::LocalCache;
pub use gateway::ContentSyncGateway;
pub use leads::LeadCapture;
pub use policy::FallbackPolicy;
pub use remote::ApiClient;
pub use store::{CommitError, ContentStore};
pub use visitors::VisitorLedger;

pub use funnel_core::content::{EditingBuffer, Section, SiteContent};
pub use funnel_core::error::{CaptureError, EditError, SyncError};
pub use funnel_core::lead::{LeadSource, Subscriber};
pub use funnel_core::visitor::{Visitor, VISITOR_CAP};
