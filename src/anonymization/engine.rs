//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that sequences the
//! detection phases, resolves overlaps, assigns tokens and rewrites the
//! text.
//!
//! # Architecture
//!
//! One call runs, in order:
//! 1. Structured detectors (email, phone, IP, URL, national ID, medical
//!    references, addresses, then the optional financial and account
//!    identifiers), all over the raw input
//! 2. Overlap resolution of everything collected so far
//! 3. Entity detection (tagger when available, regex names otherwise),
//!    filtered against the resolved set
//! 4. Token assignment with a strategy created for this call only
//! 5. A single substitution pass
//!
//! Any error in these steps yields a failed result carrying the original
//! text unchanged; a partially anonymized text is never returned.
//!
//! # Examples
//!
//! ```
//! use whisper::anonymization::{AnonymizationEngine, Settings};
//!
//! let engine = AnonymizationEngine::new()?;
//! let settings = Settings { email: true, ..Settings::none() };
//!
//! let result = engine.anonymize("Mon email est test@example.com", &settings);
//! assert!(result.success);
//! assert_eq!(result.anonymized_text, "Mon email est [EMAIL_1]");
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::anonymization::{
    anonymizer,
    detector::{
        AddressDetector, Detector, IpDetector, KeywordIdentifierDetector, NameDetector,
        PatternDetector, PatternLibrary, PhoneDetector,
    },
    lexicon::Lexicon,
    models::{AnonymizationResult, CandidateMatch, DetectionCategory, MappingSummary},
    resolver,
    settings::Settings,
    substitution,
    tagger::{EntityDetector, LanguageDetector, StopwordLanguageDetector, TaggerRegistry},
};
use crate::logging::fingerprint;
use crate::{log_anonymization_complete, log_phase_complete};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

/// Punctuation never kept at the end of a URL
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Output of one successful pipeline run
struct Outcome {
    text: String,
    matches: Vec<CandidateMatch>,
    mapping: Option<MappingSummary>,
}

/// Main anonymization engine
///
/// Built once at startup (patterns compiled, lexicon loaded, tagger models
/// registered) and shared across calls. Calls share no mutable state, so the
/// engine can be wrapped in `Arc` and used from many threads.
pub struct AnonymizationEngine {
    structured: Vec<Box<dyn Detector>>,
    entities: EntityDetector,
}

/// Structured detectors in phase order
fn structured_detectors(library: &PatternLibrary) -> Vec<Box<dyn Detector>> {
    use DetectionCategory as C;
    let lib = library.clone();

    vec![
        Box::new(PatternDetector::new("email", C::Email, lib.email)),
        Box::new(PhoneDetector::new(lib.phone)),
        Box::new(IpDetector::new(lib.ip_private, lib.ip_loopback, lib.ipv4)),
        Box::new(PatternDetector::new("url", C::Url, lib.url).with_trailing_trim(URL_TRAILING)),
        Box::new(PatternDetector::new("national_id", C::NationalId, lib.national_id)),
        Box::new(KeywordIdentifierDetector::new(
            "medical_reference",
            C::MedicalReference,
            lib.medical_reference,
        )
        .requiring_digit()),
        Box::new(AddressDetector::new(
            vec![lib.complete_address, lib.precise_address],
            vec![lib.postal_code, lib.street],
        )),
        Box::new(PatternDetector::new("credit_card", C::CreditCard, lib.credit_card)),
        Box::new(PatternDetector::new("iban", C::Iban, lib.iban)),
        Box::new(PatternDetector::new("bank_account", C::BankAccount, lib.bank_account)),
        Box::new(PatternDetector::new("id_card", C::IdCard, lib.id_card)),
        Box::new(PatternDetector::new("passport", C::Passport, lib.passport)),
        Box::new(KeywordIdentifierDetector::new("login", C::Login, lib.login)),
        Box::new(KeywordIdentifierDetector::new(
            "employee_id",
            C::EmployeeId,
            lib.employee_id,
        )),
        Box::new(KeywordIdentifierDetector::new(
            "legal_case",
            C::LegalCase,
            lib.legal_case,
        )),
        Box::new(PatternDetector::new("salary", C::SalaryData, lib.salary)),
        Box::new(KeywordIdentifierDetector::new(
            "medical_data",
            C::MedicalData,
            lib.medical_data,
        )),
        Box::new(KeywordIdentifierDetector::new("grades", C::Grades, lib.grades)),
        Box::new(PatternDetector::new("geolocation", C::Geolocation, lib.geolocation)),
        Box::new(KeywordIdentifierDetector::new(
            "biometric",
            C::Biometric,
            lib.biometric,
        )),
    ]
}

impl AnonymizationEngine {
    /// Create an engine with the embedded lexicon and no entity tagger
    pub fn new() -> Result<Self> {
        let lexicon = Lexicon::default_lexicon().context("Failed to load embedded lexicon")?;
        Self::with_components(lexicon, None)
    }

    /// Create an engine from a lexicon and an optional set of tagger models.
    ///
    /// Without a registry, name detection is regex-only.
    pub fn with_components(lexicon: Lexicon, taggers: Option<Arc<TaggerRegistry>>) -> Result<Self> {
        let library = PatternLibrary::new().context("Failed to compile detection patterns")?;
        let lexicon = Arc::new(lexicon);

        let names = NameDetector::new(
            library.person_name.clone(),
            library.single_person_name.clone(),
            Arc::clone(&lexicon),
        );
        let language: Box<dyn LanguageDetector> =
            Box::new(StopwordLanguageDetector::from_lexicon(&lexicon));
        let entities = EntityDetector::new(taggers, language, names, lexicon);

        Ok(Self {
            structured: structured_detectors(&library),
            entities,
        })
    }

    /// Replace the language identifier used to pick a tagger model
    pub fn with_language_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.entities = self.entities.with_language_detector(detector);
        self
    }

    /// Whether entity detection can use a tagger model
    pub fn has_tagger(&self) -> bool {
        self.entities.has_tagger()
    }

    /// Anonymize `text` according to `settings`
    ///
    /// Never fails: errors are reported in the result, with
    /// `success == false` and the original text as output.
    pub fn anonymize(&self, text: &str, settings: &Settings) -> AnonymizationResult {
        self.anonymize_with(text, settings, true)
    }

    /// Same pipeline with the entity tagger skipped, names found by regex
    /// only
    pub fn anonymize_fast(&self, text: &str, settings: &Settings) -> AnonymizationResult {
        self.anonymize_with(text, settings, false)
    }

    fn anonymize_with(&self, text: &str, settings: &Settings, use_tagger: bool) -> AnonymizationResult {
        let started = Instant::now();
        let outcome = self.run(text, settings, use_tagger);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(outcome) => {
                log_anonymization_complete!(outcome.matches.len(), elapsed_ms, true);
                AnonymizationResult::completed(
                    text.to_string(),
                    outcome.text,
                    outcome.matches,
                    elapsed_ms,
                    outcome.mapping,
                )
            }
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "Anonymization failed, returning original text");
                log_anonymization_complete!(0usize, elapsed_ms, false);
                AnonymizationResult::failed(text.to_string(), elapsed_ms, format!("{err:#}"))
            }
        }
    }

    fn run(&self, text: &str, settings: &Settings, use_tagger: bool) -> Result<Outcome> {
        settings.validate().context("Invalid anonymization settings")?;

        let mut candidates = Vec::new();
        for detector in &self.structured {
            if !detector.is_enabled(settings) {
                continue;
            }
            let found = detector
                .detect(text, settings)
                .with_context(|| format!("Detector '{}' failed", detector.name()))?;
            log_phase_complete!(detector.name(), found.len());
            candidates.extend(found);
        }

        let mut accepted = resolver::resolve(candidates);

        if self.entities.is_enabled(settings) {
            let found = if use_tagger {
                self.entities
                    .detect(text, settings)
                    .context("Entity detection failed")?
            } else {
                self.entities.detect_regex_only(text, settings)
            };
            let admitted = resolver::admit(&mut accepted, found);
            log_phase_complete!(self.entities.name(), admitted);
        }

        let mut strategy = anonymizer::for_settings(settings);
        accepted.assign_replacements(|m| strategy.anonymize(m))?;

        let output = substitution::apply(text, accepted.as_slice())
            .context("Failed to apply substitutions")?;

        for m in accepted.iter() {
            tracing::trace!(
                category = %m.category,
                start = m.start,
                end = m.end,
                value = %fingerprint(&m.original),
                "Span replaced"
            );
        }

        Ok(Outcome {
            text: output,
            matches: accepted.into_vec(),
            mapping: strategy.mapping_summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::tagger::{EntityLabel, EntityTagger, TaggedEntity, TaggerError};

    fn engine() -> AnonymizationEngine {
        AnonymizationEngine::new().unwrap()
    }

    struct FixedTagger(Vec<(EntityLabel, &'static str)>);

    impl EntityTagger for FixedTagger {
        fn name(&self) -> &str {
            "fixed"
        }

        fn tag_entities(&self, text: &str) -> Result<Vec<TaggedEntity>, TaggerError> {
            Ok(self
                .0
                .iter()
                .filter_map(|(label, needle)| {
                    text.find(needle)
                        .map(|start| TaggedEntity::new(*label, start, start + needle.len(), *needle))
                })
                .collect())
        }
    }

    #[test]
    fn test_email_scenario() {
        let settings = Settings {
            email: true,
            ..Settings::none()
        };
        let result = engine().anonymize("Mon email est test@example.com", &settings);

        assert!(result.success);
        assert_eq!(result.original_text, "Mon email est test@example.com");
        assert_eq!(result.anonymized_text, "Mon email est [EMAIL_1]");
        assert_eq!(result.anonymizations_count, 1);
    }

    #[test]
    fn test_nothing_enabled_is_identity() {
        let text = "Marie Dupont, 06 12 34 56 78, marie@example.com";
        let result = engine().anonymize(text, &Settings::none());

        assert!(result.success);
        assert_eq!(result.anonymized_text, text);
        assert_eq!(result.anonymizations_count, 0);
    }

    #[test]
    fn test_empty_text() {
        let result = engine().anonymize("", &Settings::all());
        assert!(result.success);
        assert_eq!(result.anonymized_text, "");
        assert_eq!(result.anonymizations_count, 0);
    }

    #[test]
    fn test_names_never_overlap_structured_spans() {
        let settings = Settings {
            names: true,
            addresses: true,
            ..Settings::none()
        };
        let text = "Marie Dupont habite au 12 rue Victor Hugo 75002 Paris";
        let result = engine().anonymize(text, &settings);

        assert!(result.success);
        let categories: Vec<_> = result.matches.iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![DetectionCategory::Name, DetectionCategory::Address]
        );
        assert_eq!(result.anonymized_text, "[NAME_1] habite au [ADDRESS_1]");
    }

    #[test]
    fn test_non_consistent_mode_uses_prefix() {
        let settings = Settings {
            email: true,
            use_consistent_tokens: false,
            ..Settings::none()
        };
        let result = engine().anonymize("a@b.fr puis a@b.fr", &settings);

        assert_eq!(result.anonymized_text, "[EMAIL] puis [EMAIL]");
        assert!(result.mapping_summary.is_none());
    }

    #[test]
    fn test_invalid_settings_fail_without_changes() {
        let mut settings = Settings {
            email: true,
            ..Settings::none()
        };
        settings.tokens.email = "[EM\nAIL]".to_string();
        let text = "contact: a@b.fr";
        let result = engine().anonymize(text, &settings);

        assert!(!result.success);
        assert_eq!(result.anonymized_text, text);
        assert_eq!(result.anonymizations_count, 0);
        assert!(!result.errors.is_empty());
        assert!(result.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_tagger_entities_are_used() {
        let registry = TaggerRegistry::new().with_multilingual(Arc::new(FixedTagger(vec![
            (EntityLabel::Person, "Bonjour Sylvie"),
            (EntityLabel::Organization, "Initech"),
        ])));
        let engine = AnonymizationEngine::with_components(
            Lexicon::default_lexicon().unwrap(),
            Some(Arc::new(registry)),
        )
        .unwrap();
        assert!(engine.has_tagger());

        let settings = Settings {
            names: true,
            ..Settings::none()
        };
        let text = "Bonjour Sylvie, le contrat Initech est signé.";

        let result = engine.anonymize(text, &settings);
        assert_eq!(result.anonymized_text, "Bonjour [NAME_1], le contrat [ORG_1] est signé.");

        let fast = engine.anonymize_fast(text, &settings);
        assert_eq!(fast.anonymized_text, text);
    }
}
