//! Redaction strategy

use super::Anonymizer;
use crate::anonymization::models::{CandidateMatch, MappingSummary};
use anyhow::Result;

/// Redaction strategy - replaces every match with its category prefix,
/// keeping no mapping
#[derive(Debug, Default)]
pub struct RedactionStrategy;

impl RedactionStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Anonymizer for RedactionStrategy {
    fn anonymize(&mut self, candidate: &CandidateMatch) -> Result<String> {
        Ok(candidate.replacement.clone())
    }

    fn mapping_summary(&self) -> Option<MappingSummary> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::DetectionCategory;

    #[test]
    fn test_redaction() {
        let mut strategy = RedactionStrategy::new();
        let text = "test@example.com";
        let candidate = CandidateMatch::new(DetectionCategory::Email, text, 0, text.len(), "[EMAIL]");

        assert_eq!(strategy.anonymize(&candidate).unwrap(), "[EMAIL]");
        assert_eq!(strategy.anonymize(&candidate).unwrap(), "[EMAIL]");
        assert!(strategy.mapping_summary().is_none());
    }
}
