//! Entity tagging capability
//!
//! The entity recognizer is an injected dependency: the engine only sees
//! [`EntityTagger`]. Models are loaded once by the host, registered in a
//! [`TaggerRegistry`] and shared across calls.

pub mod adapter;
pub mod filter;
pub mod language;
pub mod registry;

pub use adapter::EntityDetector;
pub use language::{Language, LanguageDetector, StopwordLanguageDetector};
pub use registry::TaggerRegistry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse entity classes reported by a tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Misc,
}

impl EntityLabel {
    /// Map a model tag (`PER`, `ORG`, `LOC`, `GPE`, `MISC`, ...) to a label
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "PER" | "PERSON" => Some(Self::Person),
            "ORG" | "ORGANIZATION" => Some(Self::Organization),
            "LOC" | "GPE" | "LOCATION" => Some(Self::Location),
            "MISC" => Some(Self::Misc),
            _ => None,
        }
    }
}

/// One entity reported by a tagger, with byte offsets into the tagged text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedEntity {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TaggedEntity {
    pub fn new(label: EntityLabel, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            label,
            start,
            end,
            text: text.into(),
        }
    }
}

/// Tagger failures; any of them makes the call fall back to regex names
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Entity model unavailable: {0}")]
    Unavailable(String),

    #[error("Entity tagging failed: {0}")]
    Inference(String),

    #[error("Tagger returned span [{start}, {end}) invalid for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },
}

/// Named-entity recognizer over plain text.
///
/// Implementations are shared across concurrent calls and must be safe for
/// read-only use.
pub trait EntityTagger: Send + Sync {
    /// Model identifier used in logs
    fn name(&self) -> &str;

    /// Tag persons, organizations, locations and miscellaneous entities
    fn tag_entities(&self, text: &str) -> Result<Vec<TaggedEntity>, TaggerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PER", Some(EntityLabel::Person))]
    #[test_case("org", Some(EntityLabel::Organization))]
    #[test_case("GPE", Some(EntityLabel::Location))]
    #[test_case("MISC", Some(EntityLabel::Misc))]
    #[test_case("DATE", None)]
    fn test_from_tag(tag: &str, expected: Option<EntityLabel>) {
        assert_eq!(EntityLabel::from_tag(tag), expected);
    }

    #[test]
    fn test_error_display() {
        let err = TaggerError::InvalidSpan {
            start: 4,
            end: 2,
            len: 10,
        };
        assert!(err.to_string().contains("[4, 2)"));
    }
}
