//! Subscriber records captured by the funnel forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where on the page the email was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadSource {
    Hero,
    Quiz,
    ExitPopup,
    StickyBar,
    Cta,
    Testimonials,
}

impl LeadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Hero => "hero",
            LeadSource::Quiz => "quiz",
            LeadSource::ExitPopup => "exit-popup",
            LeadSource::StickyBar => "sticky-bar",
            LeadSource::Cta => "cta",
            LeadSource::Testimonials => "testimonials",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hero" => Some(LeadSource::Hero),
            "quiz" => Some(LeadSource::Quiz),
            "exit-popup" => Some(LeadSource::ExitPopup),
            "sticky-bar" => Some(LeadSource::StickyBar),
            "cta" => Some(LeadSource::Cta),
            "testimonials" => Some(LeadSource::Testimonials),
            _ => None,
        }
    }
}

/// One captured lead. Created once per successful form submit, never
/// mutated, deleted only by explicit admin action.
///
/// The id, not the email, is the unique key in the durable store, so a
/// re-submission of the same address under a fresh id is accepted under
/// the default uniqueness policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub source: LeadSource,
    pub timestamp: DateTime<Utc>,
    /// Chosen option index per quiz question, present only for
    /// quiz-sourced captures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_answers: Option<Vec<u32>>,
}

/// Syntactic email check: one `@`, a non-empty local part, a dotted
/// domain with non-empty labels, no whitespace. Deliverability is not
/// our problem; shape is.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "bad-email",
            "@example.com",
            "user@",
            "user@nodot",
            "user@example..com",
            "user@.example.com",
            "two@at@signs.com",
            "spaced out@example.com",
            "",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn source_round_trips_through_kebab_case() {
        for source in [
            LeadSource::Hero,
            LeadSource::Quiz,
            LeadSource::ExitPopup,
            LeadSource::StickyBar,
            LeadSource::Cta,
            LeadSource::Testimonials,
        ] {
            assert_eq!(LeadSource::parse(source.as_str()), Some(source));
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }

    #[test]
    fn quiz_answers_are_omitted_when_absent() {
        let subscriber = Subscriber {
            id: "abc".into(),
            email: "user@example.com".into(),
            source: LeadSource::Hero,
            timestamp: Utc::now(),
            quiz_answers: None,
        };
        let value = serde_json::to_value(&subscriber).unwrap();
        assert!(value.get("quizAnswers").is_none());
    }
}
