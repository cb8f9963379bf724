//! Token assignment strategies
//!
//! Once overlaps are resolved, every accepted match gets its final
//! replacement from an [`Anonymizer`]. A fresh strategy is built for each
//! call; none of them outlives the call that created it.

pub mod redaction;
pub mod tokenization;

pub use redaction::RedactionStrategy;
pub use tokenization::{normalize_name, token_stem, ConsistencyMapper};

use crate::anonymization::models::{CandidateMatch, MappingSummary};
use crate::anonymization::settings::Settings;
use anyhow::Result;

/// Trait for token assignment strategies
pub trait Anonymizer: Send {
    /// Final replacement text for an accepted match
    fn anonymize(&mut self, candidate: &CandidateMatch) -> Result<String>;

    /// Snapshot of original → token mappings, when the strategy keeps one
    fn mapping_summary(&self) -> Option<MappingSummary>;
}

/// Strategy selected by `settings`: numbered consistent tokens, or the bare
/// category prefix
pub fn for_settings(settings: &Settings) -> Box<dyn Anonymizer> {
    if settings.use_consistent_tokens {
        Box::new(ConsistencyMapper::new())
    } else {
        Box::new(RedactionStrategy::new())
    }
}
