//! Entity detection phase: tagger when available, regex names otherwise

use super::filter::EntityFilter;
use super::language::LanguageDetector;
use super::registry::TaggerRegistry;
use super::TaggerError;
use crate::anonymization::detector::{Detector, NameDetector};
use crate::anonymization::lexicon::Lexicon;
use crate::anonymization::models::CandidateMatch;
use crate::anonymization::settings::Settings;
use crate::log_tagger_fallback;
use anyhow::Result;
use std::sync::Arc;

/// Names, organizations, locations and identifiers.
///
/// Tagger failures never escape this detector: the call degrades to the
/// regex name detector and a warning is logged.
pub struct EntityDetector {
    registry: Option<Arc<TaggerRegistry>>,
    language: Box<dyn LanguageDetector>,
    names: NameDetector,
    lexicon: Arc<Lexicon>,
}

impl EntityDetector {
    pub fn new(
        registry: Option<Arc<TaggerRegistry>>,
        language: Box<dyn LanguageDetector>,
        names: NameDetector,
        lexicon: Arc<Lexicon>,
    ) -> Self {
        Self {
            registry,
            language,
            names,
            lexicon,
        }
    }

    /// Replace the language identifier used to pick a model
    pub fn with_language_detector(mut self, language: Box<dyn LanguageDetector>) -> Self {
        self.language = language;
        self
    }

    /// Regex name detection only, skipping any registered tagger
    pub fn detect_regex_only(&self, text: &str, settings: &Settings) -> Vec<CandidateMatch> {
        self.names.find_names(text, &settings.tokens.name)
    }

    /// Whether any tagger model is registered
    pub fn has_tagger(&self) -> bool {
        self.registry.as_ref().is_some_and(|r| !r.is_empty())
    }

    fn tagged(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>, TaggerError> {
        let language = self.language.detect_language(text);
        let tagger = self
            .registry
            .as_ref()
            .and_then(|r| r.select(language))
            .ok_or_else(|| TaggerError::Unavailable(format!("no model for language '{language}'")))?;

        tracing::debug!(model = tagger.name(), language = %language, "Tagging entities");
        let entities = tagger.tag_entities(text)?;

        EntityFilter::new(&self.lexicon, &self.names, &settings.tokens).apply(text, &entities)
    }
}

impl Detector for EntityDetector {
    fn name(&self) -> &'static str {
        "entities"
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.names
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        if self.registry.is_none() {
            return Ok(self.detect_regex_only(text, settings));
        }

        match self.tagged(text, settings) {
            Ok(found) => Ok(found),
            Err(err) => {
                log_tagger_fallback!(err);
                Ok(self.detect_regex_only(text, settings))
            }
        }
    }
}
