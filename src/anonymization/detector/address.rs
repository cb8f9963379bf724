//! Postal address detection

use super::Detector;
use crate::anonymization::models::{CandidateMatch, DetectionCategory};
use crate::anonymization::settings::Settings;
use anyhow::Result;
use regex::Regex;

/// Two-pass address detector.
///
/// The first pass finds full addresses (number, street, postal code, city),
/// clipped at the first line break. The second pass finds bare postal codes
/// and street fragments and drops those lying inside a full address.
pub struct AddressDetector {
    complete: Vec<Regex>,
    fragments: Vec<Regex>,
}

impl AddressDetector {
    /// `complete` patterns run in order, earlier ones winning on shared starts
    pub fn new(complete: Vec<Regex>, fragments: Vec<Regex>) -> Self {
        Self {
            complete,
            fragments,
        }
    }

    fn complete_addresses(&self, text: &str, prefix: &str) -> Vec<CandidateMatch> {
        let mut found: Vec<CandidateMatch> = Vec::new();

        for regex in &self.complete {
            for m in regex.find_iter(text) {
                if found.iter().any(|c| c.start <= m.start() && m.start() < c.end) {
                    continue;
                }
                let candidate =
                    CandidateMatch::new(DetectionCategory::Address, text, m.start(), m.end(), prefix);
                if let Some(clipped) = candidate.clip_at_layout_break() {
                    found.push(clipped);
                }
            }
        }

        found
    }
}

impl Detector for AddressDetector {
    fn name(&self) -> &'static str {
        "address"
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.addresses
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        let prefix = settings.tokens.address.as_str();
        let mut found = self.complete_addresses(text, prefix);
        let complete_count = found.len();

        for regex in &self.fragments {
            for m in regex.find_iter(text) {
                let candidate =
                    CandidateMatch::new(DetectionCategory::Address, text, m.start(), m.end(), prefix);
                let Some(fragment) = candidate.clip_at_layout_break() else {
                    continue;
                };
                let covered = found[..complete_count]
                    .iter()
                    .any(|c| c.start <= fragment.start && fragment.end <= c.end);
                if !covered {
                    found.push(fragment);
                }
            }
        }

        Ok(found)
    }
}
