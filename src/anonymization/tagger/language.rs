//! Lightweight language identification

use crate::anonymization::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Inputs with fewer non-blank characters than this are not inspected
const MIN_DETECTABLE_CHARS: usize = 10;

/// Languages the tagger registry can hold models for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    French,
    English,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Best-effort language identification. Must answer French when unsure.
pub trait LanguageDetector: Send + Sync {
    fn detect_language(&self, text: &str) -> Language;
}

/// Counts stopword hits per language
#[derive(Debug, Clone)]
pub struct StopwordLanguageDetector {
    french: HashSet<String>,
    english: HashSet<String>,
}

impl StopwordLanguageDetector {
    pub fn new(french: HashSet<String>, english: HashSet<String>) -> Self {
        Self { french, english }
    }

    /// Use the stopword lists of a lexicon
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        Self::new(
            lexicon.french_stopwords.clone(),
            lexicon.english_stopwords.clone(),
        )
    }
}

impl LanguageDetector for StopwordLanguageDetector {
    fn detect_language(&self, text: &str) -> Language {
        let visible = text.chars().filter(|c| !c.is_whitespace()).count();
        if visible < MIN_DETECTABLE_CHARS {
            return Language::French;
        }

        let (mut fr, mut en) = (0usize, 0usize);
        for word in text
            .split(|c: char| !c.is_alphabetic() && c != '\'')
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if self.french.contains(&word) {
                fr += 1;
            }
            if self.english.contains(&word) {
                en += 1;
            }
        }

        if en > fr {
            Language::English
        } else {
            Language::French
        }
    }
}
