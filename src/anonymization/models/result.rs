//! Anonymization result

use super::category::DetectionCategory;
use super::matches::CandidateMatch;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Category → {original value → token}, the table needed for reversal
pub type MappingSummary = BTreeMap<DetectionCategory, BTreeMap<String, String>>;

/// Outcome of one anonymization call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Whether every enabled, matched category was processed
    pub success: bool,
    /// Input text, unchanged
    pub original_text: String,
    /// Redacted text (equal to the input when `success` is false)
    pub anonymized_text: String,
    /// Accepted matches with their final tokens, ascending by offset
    pub matches: Vec<CandidateMatch>,
    /// Number of substitutions performed
    pub anonymizations_count: usize,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,
    /// Reversal table, present only in consistent-token mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_summary: Option<MappingSummary>,
    /// Human-readable error messages
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AnonymizationResult {
    /// Build a successful result
    pub fn completed(
        original_text: String,
        anonymized_text: String,
        matches: Vec<CandidateMatch>,
        processing_time_ms: f64,
        mapping_summary: Option<MappingSummary>,
    ) -> Self {
        Self {
            success: true,
            original_text,
            anonymized_text,
            anonymizations_count: matches.len(),
            matches,
            processing_time_ms,
            mapping_summary,
            errors: Vec::new(),
        }
    }

    /// Build a failed result: the text is returned untouched
    pub fn failed(original_text: String, processing_time_ms: f64, error: String) -> Self {
        Self {
            success: false,
            anonymized_text: original_text.clone(),
            original_text,
            matches: Vec::new(),
            anonymizations_count: 0,
            processing_time_ms,
            mapping_summary: None,
            errors: vec![error],
        }
    }

    /// Match counts per category
    pub fn stats_by_category(&self) -> HashMap<DetectionCategory, usize> {
        let mut stats = HashMap::new();
        for m in &self.matches {
            *stats.entry(m.category).or_insert(0) += 1;
        }
        stats
    }

    /// Check if anything was redacted
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_keeps_text() {
        let result = AnonymizationResult::failed("secret".into(), 1.5, "boom".into());
        assert!(!result.success);
        assert_eq!(result.anonymized_text, "secret");
        assert_eq!(result.anonymizations_count, 0);
        assert_eq!(result.errors, vec!["boom".to_string()]);
        assert!(result.mapping_summary.is_none());
    }

    #[test]
    fn test_stats_by_category() {
        let text = "a@b.fr c@d.fr 0612345678";
        let matches = vec![
            CandidateMatch::new(DetectionCategory::Email, text, 0, 6, "[EMAIL_1]"),
            CandidateMatch::new(DetectionCategory::Email, text, 7, 13, "[EMAIL_2]"),
            CandidateMatch::new(DetectionCategory::Phone, text, 14, 24, "[PHONE_1]"),
        ];
        let result =
            AnonymizationResult::completed(text.into(), String::new(), matches, 0.0, None);
        let stats = result.stats_by_category();
        assert_eq!(stats[&DetectionCategory::Email], 2);
        assert_eq!(stats[&DetectionCategory::Phone], 1);
        assert_eq!(result.anonymizations_count, 3);
    }

    #[test]
    fn test_mapping_summary_serializes_category_keys() {
        let mut summary = MappingSummary::new();
        summary
            .entry(DetectionCategory::Email)
            .or_default()
            .insert("a@b.fr".into(), "[EMAIL_1]".into());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["EMAIL"]["a@b.fr"], "[EMAIL_1]");
    }
}
