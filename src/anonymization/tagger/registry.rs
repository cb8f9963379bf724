//! Loaded entity models, keyed by language

use super::language::Language;
use super::EntityTagger;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Models loaded at startup.
///
/// Selection for a detected language: that language's model, then the
/// multilingual one, then French, then any loaded model.
#[derive(Clone, Default)]
pub struct TaggerRegistry {
    by_language: BTreeMap<Language, Arc<dyn EntityTagger>>,
    multilingual: Option<Arc<dyn EntityTagger>>,
}

impl TaggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model for one language
    pub fn with_tagger(mut self, language: Language, tagger: Arc<dyn EntityTagger>) -> Self {
        self.by_language.insert(language, tagger);
        self
    }

    /// Register the multilingual fallback model
    pub fn with_multilingual(mut self, tagger: Arc<dyn EntityTagger>) -> Self {
        self.multilingual = Some(tagger);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty() && self.multilingual.is_none()
    }

    /// Best model for `language`, if any is loaded
    pub fn select(&self, language: Language) -> Option<Arc<dyn EntityTagger>> {
        self.by_language
            .get(&language)
            .or(self.multilingual.as_ref())
            .or_else(|| self.by_language.get(&Language::French))
            .or_else(|| self.by_language.values().next())
            .cloned()
    }
}

impl fmt::Debug for TaggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let languages: Vec<_> = self
            .by_language
            .iter()
            .map(|(lang, tagger)| format!("{lang}={}", tagger.name()))
            .collect();
        f.debug_struct("TaggerRegistry")
            .field("by_language", &languages)
            .field(
                "multilingual",
                &self.multilingual.as_ref().map(|t| t.name().to_string()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::tagger::{TaggedEntity, TaggerError};

    struct Named(&'static str);

    impl EntityTagger for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn tag_entities(&self, _text: &str) -> Result<Vec<TaggedEntity>, TaggerError> {
            Ok(Vec::new())
        }
    }

    fn selected(registry: &TaggerRegistry, language: Language) -> Option<String> {
        registry.select(language).map(|t| t.name().to_string())
    }

    #[test]
    fn test_empty_registry() {
        let registry = TaggerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(selected(&registry, Language::French), None);
    }

    #[test]
    fn test_language_model_preferred() {
        let registry = TaggerRegistry::new()
            .with_tagger(Language::French, Arc::new(Named("fr")))
            .with_tagger(Language::English, Arc::new(Named("en")))
            .with_multilingual(Arc::new(Named("multi")));
        assert_eq!(selected(&registry, Language::English).as_deref(), Some("en"));
        assert_eq!(selected(&registry, Language::French).as_deref(), Some("fr"));
    }

    #[test]
    fn test_multilingual_then_french_fallback() {
        let registry = TaggerRegistry::new()
            .with_tagger(Language::French, Arc::new(Named("fr")))
            .with_multilingual(Arc::new(Named("multi")));
        assert_eq!(
            selected(&registry, Language::English).as_deref(),
            Some("multi")
        );

        let registry = TaggerRegistry::new().with_tagger(Language::French, Arc::new(Named("fr")));
        assert_eq!(selected(&registry, Language::English).as_deref(), Some("fr"));
    }

    #[test]
    fn test_any_loaded_model() {
        let registry = TaggerRegistry::new().with_tagger(Language::English, Arc::new(Named("en")));
        assert_eq!(selected(&registry, Language::French).as_deref(), Some("en"));
    }
}
