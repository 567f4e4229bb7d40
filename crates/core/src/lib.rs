//! Domain model for the lead-funnel content platform.
//!
//! Pure types and logic shared by the API server and the client SDK:
//! the [`content::SiteContent`] document with its eleven sections and
//! editing buffer, subscriber and visitor records, the error taxonomy,
//! and the in-process event bus.

pub mod content;
pub mod error;
pub mod events;
pub mod id;
pub mod lead;
pub mod visitor;
