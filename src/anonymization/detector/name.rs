//! Capitalization-based person name detection

use crate::anonymization::lexicon::Lexicon;
use crate::anonymization::models::{CandidateMatch, DetectionCategory};
use regex::Regex;
use std::sync::Arc;

const CODE_PUNCTUATION: [char; 11] = ['(', ')', '{', '}', '[', ']', '=', ':', ';', '"', '\''];

/// Regex name detector and the person-name heuristic shared with the entity
/// tagger filters
pub struct NameDetector {
    pattern: Regex,
    whole_name: Regex,
    lexicon: Arc<Lexicon>,
}

impl NameDetector {
    /// `pattern` finds two-word names anywhere; `whole_name` must match a
    /// complete candidate (one or two words)
    pub fn new(pattern: Regex, whole_name: Regex, lexicon: Arc<Lexicon>) -> Self {
        Self {
            pattern,
            whole_name,
            lexicon,
        }
    }

    /// Every capitalization match that passes [`Self::is_likely_person_name`]
    pub fn find_names(&self, text: &str, prefix: &str) -> Vec<CandidateMatch> {
        self.pattern
            .find_iter(text)
            .filter(|m| self.is_likely_person_name(m.as_str()))
            .map(|m| CandidateMatch::new(DetectionCategory::Name, text, m.start(), m.end(), prefix))
            .collect()
    }

    /// Heuristic filter rejecting greetings, stoplisted words, company
    /// names, job titles, code fragments and anything over three words
    pub fn is_likely_person_name(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        let lower = trimmed.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let lexicon = &self.lexicon;

        let Some(first) = words.first() else {
            return false;
        };
        if words.len() > 3 {
            return false;
        }
        if lexicon.greetings.iter().any(|g| g == first) {
            return false;
        }
        if lexicon.non_name_words.contains(lower.as_str()) {
            return false;
        }
        if words.iter().any(|w| lexicon.blocking_words.contains(*w)) {
            return false;
        }
        if lexicon.looks_like_company(&lower) {
            return false;
        }
        if words.len() > 1 && lexicon.job_patterns.iter().any(|p| lower.contains(p.as_str())) {
            return false;
        }
        if trimmed.contains(CODE_PUNCTUATION) {
            return false;
        }

        self.whole_name.is_match(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::detector::PatternLibrary;
    use test_case::test_case;

    fn detector() -> NameDetector {
        let library = PatternLibrary::new().unwrap();
        NameDetector::new(
            library.person_name,
            library.single_person_name,
            Arc::new(Lexicon::default_lexicon().unwrap()),
        )
    }

    #[test_case("Marie Dupont", true ; "first last")]
    #[test_case("JOLY Sylvain", true ; "last first")]
    #[test_case("Sylvain JOLY", true ; "first upper last")]
    #[test_case("Dupont", true ; "single name")]
    #[test_case("Bonjour Marie", false ; "greeting")]
    #[test_case("Madame Dupont", false ; "civility title")]
    #[test_case("Janvier", false ; "month")]
    #[test_case("Acme Corp", false ; "company suffix")]
    #[test_case("Orange Business", false ; "company keyword")]
    #[test_case("Directeur Technique", false ; "job title")]
    #[test_case("Print(Dupont)", false ; "code punctuation")]
    #[test_case("Jean Pierre Marie Dupont", false ; "too many words")]
    #[test_case("", false ; "empty")]
    fn test_is_likely_person_name(candidate: &str, expected: bool) {
        assert_eq!(detector().is_likely_person_name(candidate), expected);
    }

    #[test]
    fn test_find_names() {
        let text = "Rapport rédigé par Marie Dupont, relu par JOLY Sylvain.";
        let found = detector().find_names(text, "[NAME]");
        let originals: Vec<&str> = found.iter().map(|m| m.original.as_str()).collect();
        assert_eq!(originals, vec!["Marie Dupont", "JOLY Sylvain"]);
        assert!(found.iter().all(|m| m.category == DetectionCategory::Name));
    }

    #[test]
    fn test_find_names_skips_greeting() {
        let found = detector().find_names("Bonjour Madame, merci.", "[NAME]");
        assert!(found.is_empty());
    }
}
