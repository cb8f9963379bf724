//! Single-pattern detectors for structured values

use super::Detector;
use crate::anonymization::models::{CandidateMatch, DetectionCategory};
use crate::anonymization::settings::Settings;
use anyhow::{Context, Result};
use regex::Regex;

/// Detector reporting every match of one pattern as one category
pub struct PatternDetector {
    name: &'static str,
    category: DetectionCategory,
    regex: Regex,
    trailing_trim: &'static [char],
}

impl PatternDetector {
    /// Create a detector for `category` backed by `regex`
    pub fn new(name: &'static str, category: DetectionCategory, regex: Regex) -> Self {
        Self {
            name,
            category,
            regex,
            trailing_trim: &[],
        }
    }

    /// Drop these characters from the end of every match (sentence
    /// punctuation glued to a URL, for instance)
    pub fn with_trailing_trim(mut self, chars: &'static [char]) -> Self {
        self.trailing_trim = chars;
        self
    }
}

impl Detector for PatternDetector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.is_enabled(self.category)
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        let prefix = settings.tokens.for_category(self.category);
        let mut found = Vec::new();

        for m in self.regex.find_iter(text) {
            let kept = m.as_str().trim_end_matches(self.trailing_trim);
            if kept.is_empty() {
                continue;
            }
            let end = m.start() + kept.len();
            found.push(CandidateMatch::new(
                self.category,
                text,
                m.start(),
                end,
                prefix,
            ));
        }

        Ok(found)
    }
}

/// Phone numbers need look-behind, so this one runs on `fancy_regex`
pub struct PhoneDetector {
    regex: fancy_regex::Regex,
}

impl PhoneDetector {
    pub fn new(regex: fancy_regex::Regex) -> Self {
        Self { regex }
    }
}

impl Detector for PhoneDetector {
    fn name(&self) -> &'static str {
        "phone"
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.phone
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        let prefix = &settings.tokens.phone;
        let mut found = Vec::new();

        for m in self.regex.find_iter(text) {
            let m = m.context("Phone pattern failed while scanning text")?;
            found.push(CandidateMatch::new(
                DetectionCategory::Phone,
                text,
                m.start(),
                m.end(),
                prefix.as_str(),
            ));
        }

        Ok(found)
    }
}

/// Keyword followed by a value, where only the value (capture group 1) is
/// replaced and the keyword stays readable.
pub struct KeywordIdentifierDetector {
    name: &'static str,
    category: DetectionCategory,
    regex: Regex,
    require_digit: bool,
}

impl KeywordIdentifierDetector {
    pub fn new(name: &'static str, category: DetectionCategory, regex: Regex) -> Self {
        Self {
            name,
            category,
            regex,
            require_digit: false,
        }
    }

    /// Ignore values without a digit ("référence claire", "Il refuse")
    pub fn requiring_digit(mut self) -> Self {
        self.require_digit = true;
        self
    }
}

impl Detector for KeywordIdentifierDetector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.is_enabled(self.category)
    }

    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>> {
        let prefix = settings.tokens.for_category(self.category);
        let mut found = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let Some(id) = caps.get(1) else {
                continue;
            };
            let kept = id
                .as_str()
                .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
            if kept.is_empty() {
                continue;
            }
            if self.require_digit && !kept.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            let end = id.start() + kept.len();
            found.push(CandidateMatch::new(
                self.category,
                text,
                id.start(),
                end,
                prefix,
            ));
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::detector::PatternLibrary;
    use test_case::test_case;

    fn phone_detector() -> PhoneDetector {
        PhoneDetector::new(PatternLibrary::new().unwrap().phone)
    }

    fn originals(found: &[CandidateMatch]) -> Vec<&str> {
        found.iter().map(|m| m.original.as_str()).collect()
    }

    #[test_case("06 12 34 56 78" ; "national spaced")]
    #[test_case("0612345678" ; "national compact")]
    #[test_case("01.23.45.67.89" ; "national dotted")]
    #[test_case("07-89-76-54-32" ; "national dashed")]
    #[test_case("+33 6 12 34 56 78" ; "international")]
    #[test_case("0033 1 23 45 67 89" ; "international double zero")]
    #[test_case("+1 (555) 123-4567" ; "international area code")]
    #[test_case("555-123-4567" ; "north american")]
    #[test_case("(555) 123-4567" ; "north american parenthesized")]
    #[test_case("+1-555-123-4567" ; "international dashed")]
    #[test_case("+44 7700 900123" ; "uk mobile")]
    #[test_case("+49 30 12345678" ; "german landline")]
    fn test_phone_formats(number: &str) {
        let text = format!("Tél : {number}.");
        let found = phone_detector().detect(&text, &Settings::default()).unwrap();
        assert_eq!(originals(&found), vec![number]);
    }

    #[test_case("Rendez-vous à 09:12" ; "clock time")]
    #[test_case("Réunion le 2026-01-10" ; "iso date")]
    #[test_case("Commande 123456789012345" ; "long digit run")]
    fn test_phone_rejections(text: &str) {
        let found = phone_detector().detect(text, &Settings::default()).unwrap();
        assert!(found.is_empty(), "unexpected phone in {text:?}: {found:?}");
    }

    #[test]
    fn test_phone_next_to_time() {
        let text = "Appelez le 01.23.45.67.89 à 09:12";
        let found = phone_detector().detect(text, &Settings::default()).unwrap();
        assert_eq!(originals(&found), vec!["01.23.45.67.89"]);
        assert_eq!(found[0].replacement, "[PHONE]");
    }

    #[test]
    fn test_url_trailing_punctuation() {
        let library = PatternLibrary::new().unwrap();
        let detector = PatternDetector::new("url", DetectionCategory::Url, library.url)
            .with_trailing_trim(&['.', ',']);
        let found = detector
            .detect("Voir https://example.com/page.", &Settings::default())
            .unwrap();
        assert_eq!(originals(&found), vec!["https://example.com/page"]);
    }

    #[test]
    fn test_email_detector_uses_configured_prefix() {
        let library = PatternLibrary::new().unwrap();
        let detector = PatternDetector::new("email", DetectionCategory::Email, library.email);
        let mut settings = Settings::default();
        settings.tokens.email = "<MAIL>".to_string();

        let found = detector
            .detect("a@b.fr et c@d.com", &settings)
            .unwrap();
        assert_eq!(originals(&found), vec!["a@b.fr", "c@d.com"]);
        assert!(found.iter().all(|m| m.replacement == "<MAIL>"));
    }

    #[test]
    fn test_medical_reference_keeps_keyword() {
        let library = PatternLibrary::new().unwrap();
        let detector = KeywordIdentifierDetector::new(
            "medical_reference",
            DetectionCategory::MedicalReference,
            library.medical_reference,
        )
        .requiring_digit();
        let text = "Patient vu, ref #MED-4432. Il refuse le traitement.";
        let found = detector.detect(text, &Settings::all()).unwrap();

        assert_eq!(originals(&found), vec!["MED-4432"]);
        assert_eq!(&text[..found[0].start], "Patient vu, ref #");
    }

    #[test]
    fn test_keyword_identifiers_without_digits() {
        let library = PatternLibrary::new().unwrap();
        let text = "login: jdoe / username=alice.martin / matricule ABCDEF";
        let mut found = Vec::new();
        for detector in [
            KeywordIdentifierDetector::new("login", DetectionCategory::Login, library.login),
            KeywordIdentifierDetector::new(
                "employee_id",
                DetectionCategory::EmployeeId,
                library.employee_id,
            ),
        ] {
            found.extend(detector.detect(text, &Settings::all()).unwrap());
        }
        assert_eq!(originals(&found), vec!["jdoe", "alice.martin", "ABCDEF"]);
    }

    #[test]
    fn test_medical_reference_requires_digit() {
        let library = PatternLibrary::new().unwrap();
        let detector = KeywordIdentifierDetector::new(
            "medical_reference",
            DetectionCategory::MedicalReference,
            library.medical_reference,
        )
        .requiring_digit();
        let found = detector
            .detect("ref #ABC-XYZ, dossier n° 2024-118", &Settings::all())
            .unwrap();
        assert_eq!(originals(&found), vec!["2024-118"]);
    }

    #[test]
    fn test_free_text_value_drops_trailing_space() {
        let library = PatternLibrary::new().unwrap();
        let detector = KeywordIdentifierDetector::new(
            "medical_data",
            DetectionCategory::MedicalData,
            library.medical_data,
        );
        let text = "Traitement : amoxicilline 1 g matin et soir pendant sept jours puis contrôle";
        let found = detector.detect(text, &Settings::all()).unwrap();
        assert_eq!(found.len(), 1);
        let value = &found[0].original;
        assert!(value.starts_with("amoxicilline"));
        assert!(!value.ends_with(' '));
        assert!(value.chars().count() <= 50);
        assert_eq!(&text[..found[0].start], "Traitement : ");
    }

    #[test]
    fn test_is_enabled_follows_settings() {
        let library = PatternLibrary::new().unwrap();
        let detector = PatternDetector::new("iban", DetectionCategory::Iban, library.iban);
        assert!(!detector.is_enabled(&Settings::default()));
        assert!(detector.is_enabled(&Settings::all()));
    }
}
