//! Consistent tokenization strategy

use super::Anonymizer;
use crate::anonymization::models::{CandidateMatch, DetectionCategory, MappingSummary};
use anyhow::Result;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Token stem for a prefix: `[EMAIL]` and `***EMAIL***` both give `EMAIL`
pub fn token_stem(prefix: &str) -> String {
    prefix.replace(['*', '[', ']'], "")
}

/// Canonical form of a person name used as mapping key.
///
/// `LASTNAME Firstname` becomes `Firstname LASTNAME`; anything that is not
/// exactly two words is returned unchanged.
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    let words: Vec<&str> = name.split_whitespace().collect();
    let [first, second] = words.as_slice() else {
        return Cow::Borrowed(name);
    };

    let first_is_upper = first.chars().any(char::is_alphabetic)
        && !first.chars().any(char::is_lowercase);
    let mut rest = second.chars();
    let second_is_capitalized =
        rest.next().is_some_and(char::is_uppercase) && rest.any(char::is_lowercase);

    if first_is_upper && second_is_capitalized {
        Cow::Owned(format!("{second} {first}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Consistency mapper - the same original value always gets the same token
/// within one call (`[EMAIL_1]`, `[EMAIL_2]`, ...), numbered per category in
/// order of first appearance.
///
/// Lookups go through a per-category key index; the mapping summary records
/// each value as it first appeared in the text, so reversal restores it.
#[derive(Debug, Default)]
pub struct ConsistencyMapper {
    mappings: MappingSummary,
    index: HashMap<DetectionCategory, HashMap<String, String>>,
    counters: HashMap<DetectionCategory, usize>,
}

impl ConsistencyMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `original` in `category`, allocating the next number on
    /// first sight
    pub fn token_for(&mut self, category: DetectionCategory, original: &str, prefix: &str) -> String {
        self.token_for_key(category, original, original, prefix)
    }

    fn token_for_key(
        &mut self,
        category: DetectionCategory,
        key: &str,
        surface: &str,
        prefix: &str,
    ) -> String {
        let known = self.index.entry(category).or_default();
        if let Some(token) = known.get(key) {
            return token.clone();
        }

        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        let token = format!("[{}_{}]", token_stem(prefix), counter);
        known.insert(key.to_string(), token.clone());
        self.mappings
            .entry(category)
            .or_insert_with(BTreeMap::new)
            .insert(surface.to_string(), token.clone());
        token
    }
}

impl Anonymizer for ConsistencyMapper {
    fn anonymize(&mut self, candidate: &CandidateMatch) -> Result<String> {
        let key = match candidate.category {
            DetectionCategory::Name => normalize_name(&candidate.original),
            _ => Cow::Borrowed(candidate.original.as_str()),
        };
        Ok(self.token_for_key(
            candidate.category,
            &key,
            &candidate.original,
            &candidate.replacement,
        ))
    }

    fn mapping_summary(&self) -> Option<MappingSummary> {
        Some(self.mappings.clone())
    }
}
