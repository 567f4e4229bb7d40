use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// The closed set of top-level section keys of a [`SiteContent`] document.
///
/// Section names arrive as strings from the wire and from the admin UI;
/// anything outside this set is rejected at the boundary with
/// [`EditError::UnknownSection`]. Unknown *fields* inside a known section
/// are allowed and preserved.
///
/// [`SiteContent`]: super::SiteContent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Seo,
    Navbar,
    Hero,
    Stats,
    Quiz,
    Features,
    Testimonials,
    Cta,
    Popup,
    Colors,
    NotFound,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Seo,
        Section::Navbar,
        Section::Hero,
        Section::Stats,
        Section::Quiz,
        Section::Features,
        Section::Testimonials,
        Section::Cta,
        Section::Popup,
        Section::Colors,
        Section::NotFound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Seo => "seo",
            Section::Navbar => "navbar",
            Section::Hero => "hero",
            Section::Stats => "stats",
            Section::Quiz => "quiz",
            Section::Features => "features",
            Section::Testimonials => "testimonials",
            Section::Cta => "cta",
            Section::Popup => "popup",
            Section::Colors => "colors",
            Section::NotFound => "notFound",
        }
    }

    /// Whether this section's value is an ordered list rather than an object.
    pub fn is_array(self) -> bool {
        matches!(self, Section::Features | Section::Testimonials)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| EditError::UnknownSection(s.to_string()))
    }
}
