//! # Whisper - rule-based anonymization of personal data
//!
//! Whisper finds personal data in free-form French or English text (names,
//! addresses, phone numbers, emails, national IDs, IP addresses, URLs,
//! medical references and financial identifiers) and replaces each
//! occurrence with a category token such as `[EMAIL_1]`. Everything else in
//! the text, including line breaks and tabs, is kept byte-for-byte.
//!
//! ## Architecture
//!
//! - [`anonymization`] - the rule engine: patterns, entity tagging, overlap
//!   resolution, token assignment, substitution
//! - [`config`] - TOML configuration with environment overrides
//! - [`cli`] - command-line interface
//! - [`domain`] - crate-wide error type
//! - [`logging`] - structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use whisper::anonymization::{AnonymizationEngine, Settings};
//!
//! let engine = AnonymizationEngine::new()?;
//! let settings = Settings {
//!     names: true,
//!     ..Settings::default()
//! };
//!
//! let result = engine.anonymize("Contact: a@b.fr\n\tTél. 06 12 34 56 78", &settings);
//! assert_eq!(result.anonymized_text, "Contact: [EMAIL_1]\n\tTél. [PHONE_1]");
//!
//! let mapping = result.mapping_summary.unwrap_or_default();
//! let restored = whisper::anonymization::deanonymize(&result.anonymized_text, &mapping)?;
//! assert_eq!(restored, result.original_text);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Entity tagging
//!
//! Name detection can be delegated to a statistical entity recognizer by
//! implementing [`anonymization::EntityTagger`] and registering it in a
//! [`anonymization::TaggerRegistry`]. Without one, names are found by
//! regular expressions filtered through the lexicon.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
