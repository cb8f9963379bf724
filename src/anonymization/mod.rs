//! Anonymization rule engine
//!
//! Detects personal data in free text and replaces every occurrence with a
//! category token, leaving the rest of the text byte-for-byte unchanged.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: compiled patterns for structured data, then an entity
//!   tagger (or regex names) for people, organizations and locations
//! - **Resolution**: first come, longest wins; accepted spans never overlap
//! - **Anonymization**: consistent numbered tokens (`[EMAIL_1]`) or bare
//!   category prefixes
//! - **Substitution**: one ascending pass over the input
//!
//! # Usage
//!
//! ```rust
//! use whisper::anonymization::{AnonymizationEngine, Settings};
//!
//! let engine = AnonymizationEngine::new()?;
//! let result = engine.anonymize("Appelez le 06 12 34 56 78", &Settings::all());
//! assert_eq!(result.anonymized_text, "Appelez le [PHONE_1]");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod anonymizer;
pub mod detector;
pub mod engine;
pub mod lexicon;
pub mod models;
pub mod report;
pub mod resolver;
pub mod settings;
pub mod substitution;
pub mod tagger;

// Re-export main types
pub use engine::AnonymizationEngine;
pub use lexicon::Lexicon;
pub use models::{AnonymizationResult, CandidateMatch, DetectionCategory, MappingSummary};
pub use report::RunReport;
pub use settings::{Settings, TokenPrefixes};
pub use substitution::deanonymize;
pub use tagger::{EntityLabel, EntityTagger, Language, TaggedEntity, TaggerError, TaggerRegistry};
