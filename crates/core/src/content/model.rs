use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::editor::EditingBuffer;
use super::section::Section;

/// SEO metadata rendered into the page head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub canonical: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navbar {
    pub logo: String,
    pub menu_items: Vec<MenuItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_secondary: String,
    /// URL or data-URI.
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display strings, not numbers ("10,000+", "30 Days", "95%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub users: String,
    pub days: String,
    pub success: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSection {
    pub title: String,
    pub subtitle: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options are conventionally four per question; the arity is advisory
/// and deliberately not enforced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub result: String,
    pub story: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cta {
    pub title: String,
    pub subtitle: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub guarantee_text: String,
    pub no_card_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Exit-intent popup copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Popup {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub dismiss_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The ten fixed theme color slots, hex strings. Hex format is not
/// validated; the admin UI is trusted to send sensible values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotFound {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full site-content document. Always total: every section is
/// present once loaded, and a section missing or corrupt at the source
/// is replaced by its default, never by an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContent {
    pub seo: Seo,
    pub navbar: Navbar,
    pub hero: Hero,
    pub stats: Stats,
    pub quiz: QuizSection,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
    pub cta: Cta,
    pub popup: Popup,
    pub colors: Colors,
    pub not_found: NotFound,
}

impl SiteContent {
    /// Build a total document from a per-section payload map.
    ///
    /// Each section decodes independently; a missing section or one that
    /// fails to decode falls back to its default so that one corrupt row
    /// never poisons the rest of the document.
    pub fn from_sections(mut sections: BTreeMap<Section, Value>) -> Self {
        let defaults = Self::default();
        Self {
            seo: take_section(&mut sections, Section::Seo, defaults.seo),
            navbar: take_section(&mut sections, Section::Navbar, defaults.navbar),
            hero: take_section(&mut sections, Section::Hero, defaults.hero),
            stats: take_section(&mut sections, Section::Stats, defaults.stats),
            quiz: take_section(&mut sections, Section::Quiz, defaults.quiz),
            features: take_section(&mut sections, Section::Features, defaults.features),
            testimonials: take_section(&mut sections, Section::Testimonials, defaults.testimonials),
            cta: take_section(&mut sections, Section::Cta, defaults.cta),
            popup: take_section(&mut sections, Section::Popup, defaults.popup),
            colors: take_section(&mut sections, Section::Colors, defaults.colors),
            not_found: take_section(&mut sections, Section::NotFound, defaults.not_found),
        }
    }

    /// JSON payload of one section.
    pub fn section_value(&self, section: Section) -> Value {
        let value = match section {
            Section::Seo => serde_json::to_value(&self.seo),
            Section::Navbar => serde_json::to_value(&self.navbar),
            Section::Hero => serde_json::to_value(&self.hero),
            Section::Stats => serde_json::to_value(&self.stats),
            Section::Quiz => serde_json::to_value(&self.quiz),
            Section::Features => serde_json::to_value(&self.features),
            Section::Testimonials => serde_json::to_value(&self.testimonials),
            Section::Cta => serde_json::to_value(&self.cta),
            Section::Popup => serde_json::to_value(&self.popup),
            Section::Colors => serde_json::to_value(&self.colors),
            Section::NotFound => serde_json::to_value(&self.not_found),
        };
        value.expect("section types serialize to plain JSON")
    }

    /// The whole document as a per-section payload map.
    pub fn to_sections(&self) -> BTreeMap<Section, Value> {
        Section::ALL
            .into_iter()
            .map(|section| (section, self.section_value(section)))
            .collect()
    }

    /// Start an edit: a deep copy with no shared state, so readers of
    /// the source document never observe changes before a commit.
    pub fn begin_edit(&self) -> EditingBuffer {
        EditingBuffer::from_sections(self.to_sections())
    }
}

fn take_section<T: serde::de::DeserializeOwned>(
    sections: &mut BTreeMap<Section, Value>,
    section: Section,
    default: T,
) -> T {
    match sections.remove(&section) {
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(section = %section, %err, "section payload failed to decode, using default");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_sections_defaults_missing_sections() {
        let mut sections = BTreeMap::new();
        sections.insert(Section::Hero, json!({ "title": "X" }));

        let content = SiteContent::from_sections(sections);
        let defaults = SiteContent::default();

        assert_eq!(content.hero.title, "X");
        // Fields absent from the hero payload fall back to the default copy.
        assert_eq!(content.hero.subtitle, defaults.hero.subtitle);
        // Every other section is the full default.
        assert_eq!(content.seo, defaults.seo);
        assert_eq!(content.colors, defaults.colors);
        assert_eq!(content.features, defaults.features);
    }

    #[test]
    fn corrupt_section_is_isolated() {
        let mut sections = SiteContent::default().to_sections();
        sections.insert(Section::Features, json!("not a list"));
        sections.insert(Section::Hero, json!({ "title": "kept" }));

        let content = SiteContent::from_sections(sections);
        let defaults = SiteContent::default();

        assert_eq!(content.features, defaults.features);
        assert_eq!(content.hero.title, "kept");
        assert_eq!(content.seo, defaults.seo);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let mut sections = SiteContent::default().to_sections();
        sections.insert(
            Section::Popup,
            json!({ "title": "Wait!", "countdownSeconds": 30 }),
        );

        let content = SiteContent::from_sections(sections);
        assert_eq!(content.popup.extra["countdownSeconds"], json!(30));

        let value = content.section_value(Section::Popup);
        assert_eq!(value["countdownSeconds"], json!(30));
        assert_eq!(value["title"], json!("Wait!"));
    }

    #[test]
    fn section_map_round_trip_is_identity() {
        let content = SiteContent::default();
        let rebuilt = SiteContent::from_sections(content.to_sections());
        assert_eq!(content, rebuilt);
    }

    #[test]
    fn whole_document_deserializes_with_partial_input() {
        let content: SiteContent = serde_json::from_value(json!({
            "hero": { "title": "From cache" }
        }))
        .unwrap();
        assert_eq!(content.hero.title, "From cache");
        assert_eq!(content.stats, SiteContent::default().stats);
    }
}
