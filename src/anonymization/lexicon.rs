//! Word lists for name heuristics and tagger post-filters
//!
//! The lists are locale-tuned data, not control flow: they ship as an
//! embedded TOML resource and can be swapped for a file at startup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Lexicon file layout
#[derive(Debug, Deserialize)]
struct LexiconFile {
    person: PersonLists,
    organization: OrganizationLists,
    location: LocationLists,
    #[serde(default)]
    language: LanguageLists,
}

#[derive(Debug, Deserialize)]
struct PersonLists {
    greetings: Vec<String>,
    civility_titles: Vec<String>,
    false_positives: Vec<String>,
    non_name_words: Vec<String>,
    blocking_words: Vec<String>,
    job_patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OrganizationLists {
    suffixes: Vec<String>,
    keywords: Vec<String>,
    false_positives: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LocationLists {
    false_positives: Vec<String>,
    common_places: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LanguageLists {
    #[serde(default)]
    fr: Vec<String>,
    #[serde(default)]
    en: Vec<String>,
}

/// Compiled, lower-cased word lists
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub greetings: Vec<String>,
    pub civility_titles: HashSet<String>,
    pub person_false_positives: HashSet<String>,
    pub non_name_words: HashSet<String>,
    pub blocking_words: HashSet<String>,
    pub job_patterns: Vec<String>,
    pub company_suffixes: Vec<String>,
    pub company_keywords: Vec<String>,
    pub organization_false_positives: HashSet<String>,
    pub location_false_positives: HashSet<String>,
    pub common_places: HashSet<String>,
    pub french_stopwords: HashSet<String>,
    pub english_stopwords: HashSet<String>,
}

fn lowered(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

fn lowered_set(words: Vec<String>) -> HashSet<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

impl Lexicon {
    /// Load a lexicon from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read lexicon: {}", path.as_ref().display()))?;

        Self::from_toml(&content)
    }

    /// Parse a lexicon from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content).context("Failed to parse lexicon TOML")?;

        Ok(Self {
            greetings: lowered(file.person.greetings),
            civility_titles: lowered_set(file.person.civility_titles),
            person_false_positives: lowered_set(file.person.false_positives),
            non_name_words: lowered_set(file.person.non_name_words),
            blocking_words: lowered_set(file.person.blocking_words),
            job_patterns: lowered(file.person.job_patterns),
            company_suffixes: lowered(file.organization.suffixes),
            company_keywords: lowered(file.organization.keywords),
            organization_false_positives: lowered_set(file.organization.false_positives),
            location_false_positives: lowered_set(file.location.false_positives),
            common_places: lowered_set(file.location.common_places),
            french_stopwords: lowered_set(file.language.fr),
            english_stopwords: lowered_set(file.language.en),
        })
    }

    /// The lexicon embedded in the binary
    pub fn default_lexicon() -> Result<Self> {
        Self::from_toml(include_str!("../../resources/lexicon.toml"))
    }

    /// Whether the last word of a lower-cased span is a company form
    /// ("acme sarl", "acme corp.")
    pub fn has_company_suffix(&self, lower: &str) -> bool {
        words(lower)
            .last()
            .is_some_and(|last| self.company_suffixes.iter().any(|s| s == last))
    }

    /// Whether a lower-cased span contains a corporate keyword.
    ///
    /// Keywords shorter than five bytes ("net", "axa") must match whole words
    /// so first names like "Annette" stay names; longer ones ("paribas") may
    /// sit inside a word.
    pub fn has_company_keyword(&self, lower: &str) -> bool {
        let span_words = words(lower);
        self.company_keywords.iter().any(|kw| {
            if kw.len() >= MIN_EMBEDDED_KEYWORD {
                lower.contains(kw.as_str())
            } else {
                let kw_words = words(kw);
                !kw_words.is_empty()
                    && span_words
                        .windows(kw_words.len())
                        .any(|window| window == kw_words.as_slice())
            }
        })
    }

    /// Whether a lower-cased span looks like an organization
    pub fn looks_like_company(&self, lower: &str) -> bool {
        self.has_company_suffix(lower) || self.has_company_keyword(lower)
    }
}

/// Keywords at least this long may match inside a word
const MIN_EMBEDDED_KEYWORD: usize = 5;

fn words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect()
}
