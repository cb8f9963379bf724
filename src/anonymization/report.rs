//! Run reporting for anonymization
//!
//! This module provides formatted reports for a single anonymization run,
//! showing counts per category, token samples and errors. Original values
//! never appear in a report, only their fingerprints.

use crate::anonymization::models::{AnonymizationResult, DetectionCategory};
use crate::logging::fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of samples kept in a report
const MAX_SAMPLES: usize = 20;

/// Summary of one anonymization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the report was built
    pub generated_at: DateTime<Utc>,

    /// Whether the run succeeded
    pub success: bool,

    /// Input size in bytes
    pub input_bytes: usize,

    /// Total substitutions performed
    pub total_anonymizations: usize,

    /// Substitutions by category
    pub anonymizations_by_category: BTreeMap<DetectionCategory, usize>,

    /// Number of distinct tokens issued (consistent mode only)
    pub distinct_tokens: Option<usize>,

    /// Sample replacements
    pub samples: Vec<ReplacementSample>,

    /// Processing time (ms)
    pub processing_time_ms: f64,

    /// Errors reported by the engine
    pub errors: Vec<String>,
}

/// One replacement, with the original value hashed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementSample {
    pub category: DetectionCategory,
    pub start: usize,
    pub end: usize,
    pub fingerprint: String,
    pub token: String,
}

impl RunReport {
    /// Build a report from an anonymization result
    pub fn from_result(result: &AnonymizationResult) -> Self {
        let mut anonymizations_by_category = BTreeMap::new();
        for m in &result.matches {
            *anonymizations_by_category.entry(m.category).or_insert(0) += 1;
        }

        let samples = result
            .matches
            .iter()
            .take(MAX_SAMPLES)
            .map(|m| ReplacementSample {
                category: m.category,
                start: m.start,
                end: m.end,
                fingerprint: fingerprint(&m.original),
                token: m.replacement.clone(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            success: result.success,
            input_bytes: result.original_text.len(),
            total_anonymizations: result.anonymizations_count,
            anonymizations_by_category,
            distinct_tokens: result
                .mapping_summary
                .as_ref()
                .map(|summary| summary.values().map(|values| values.len()).sum()),
            samples,
            processing_time_ms: result.processing_time_ms,
            errors: result.errors.clone(),
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        self.to_string()
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "───────────────────────────────────────────────────────────────";

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════════")?;
        writeln!(f, "                   ANONYMIZATION RUN REPORT                    ")?;
        writeln!(f, "═══════════════════════════════════════════════════════════════")?;
        writeln!(f)?;

        writeln!(f, "📊 SUMMARY")?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "  Status:                 {}",
            if self.success { "success" } else { "failed" }
        )?;
        writeln!(
            f,
            "  Generated At:           {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "  Input Size:             {} bytes", self.input_bytes)?;
        writeln!(f, "  Total Anonymizations:   {}", self.total_anonymizations)?;
        if let Some(distinct) = self.distinct_tokens {
            writeln!(f, "  Distinct Tokens:        {distinct}")?;
        }
        writeln!(f, "  Processing Time:        {:.2} ms", self.processing_time_ms)?;
        writeln!(f)?;

        if !self.anonymizations_by_category.is_empty() {
            writeln!(f, "🔍 ANONYMIZATIONS BY CATEGORY")?;
            writeln!(f, "{RULE}")?;

            let mut categories: Vec<_> = self.anonymizations_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));
            for (category, count) in categories {
                writeln!(f, "  {:30} {:>5}", category.label(), count)?;
            }
            writeln!(f)?;
        }

        if !self.samples.is_empty() {
            writeln!(f, "📝 SAMPLE REPLACEMENTS")?;
            writeln!(f, "{RULE}")?;
            for sample in self.samples.iter().take(10) {
                writeln!(
                    f,
                    "  [{:>6}, {:>6})  {:18} {}  →  {}",
                    sample.start,
                    sample.end,
                    sample.category.label(),
                    sample.fingerprint,
                    sample.token
                )?;
            }
            writeln!(f)?;
        }

        if !self.errors.is_empty() {
            writeln!(f, "⚠️  ERRORS")?;
            writeln!(f, "{RULE}")?;
            for error in &self.errors {
                writeln!(f, "  • {error}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "═══════════════════════════════════════════════════════════════")
    }
}
