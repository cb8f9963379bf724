//! Post-tagging filters
//!
//! Raw tagger output is noisy: greetings glued to names, job titles tagged
//! as persons, companies tagged as persons, city names that identify nobody.
//! These filters turn tagged entities into candidate matches and merge in
//! the regex name detector's findings.

use super::{EntityLabel, TaggedEntity, TaggerError};
use crate::anonymization::detector::NameDetector;
use crate::anonymization::lexicon::Lexicon;
use crate::anonymization::models::{CandidateMatch, DetectionCategory};
use crate::anonymization::settings::TokenPrefixes;

/// Split off the first word of `s`. Returns the byte length consumed
/// (word plus following spaces) and the remainder.
fn split_first_word(s: &str) -> (&str, usize, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => {
            let rest = s[idx..].trim_start();
            (&s[..idx], s.len() - rest.len(), rest)
        }
        None => (s, s.len(), ""),
    }
}

fn is_fragment(s: &str) -> bool {
    s.chars().count() <= 2 || s.ends_with('\'')
}

/// Turns tagged entities into candidates
pub struct EntityFilter<'a> {
    lexicon: &'a Lexicon,
    names: &'a NameDetector,
    prefixes: &'a TokenPrefixes,
}

impl<'a> EntityFilter<'a> {
    pub fn new(lexicon: &'a Lexicon, names: &'a NameDetector, prefixes: &'a TokenPrefixes) -> Self {
        Self {
            lexicon,
            names,
            prefixes,
        }
    }

    fn candidate(
        &self,
        category: DetectionCategory,
        text: &str,
        start: usize,
        end: usize,
    ) -> CandidateMatch {
        CandidateMatch::new(category, text, start, end, self.prefixes.for_category(category))
    }

    /// Filter tagger output for `text`, then add regex names that overlap no
    /// entity already kept.
    ///
    /// Fails only when the tagger reported a span that does not fit `text`.
    pub fn apply(
        &self,
        text: &str,
        entities: &[TaggedEntity],
    ) -> Result<Vec<CandidateMatch>, TaggerError> {
        let mut found = Vec::new();

        for entity in entities {
            let category = match entity.label {
                EntityLabel::Person => DetectionCategory::Name,
                EntityLabel::Organization => DetectionCategory::Organization,
                EntityLabel::Location => DetectionCategory::Location,
                EntityLabel::Misc => DetectionCategory::Identifier,
            };
            let raw = CandidateMatch::checked(
                category,
                text,
                entity.start,
                entity.end,
                self.prefixes.for_category(category),
            )
            .map_err(|_| TaggerError::InvalidSpan {
                start: entity.start,
                end: entity.end,
                len: text.len(),
            })?;

            // Entities never run across a line break or tab
            let Some(clipped) = raw.clip_at_layout_break() else {
                continue;
            };
            let span = clipped.original.as_str();

            let kept = match entity.label {
                EntityLabel::Person => self.person(text, clipped.start, span),
                EntityLabel::Organization => self.organization(text, clipped.start, span),
                EntityLabel::Location => self.location(text, clipped.start, span),
                EntityLabel::Misc => self.misc(text, clipped.start, span),
            };
            found.extend(kept);
        }

        for name in self.names.find_names(text, &self.prefixes.name) {
            if !found.iter().any(|m: &CandidateMatch| m.overlaps(&name)) {
                found.push(name);
            }
        }

        Ok(found)
    }

    fn person(&self, text: &str, start: usize, span: &str) -> Option<CandidateMatch> {
        let lexicon = self.lexicon;
        let is_greeting = |w: &str| lexicon.greetings.iter().any(|g| g == w);

        let mut offset = 0;
        let mut cleaned = span;

        let (first, consumed, rest) = split_first_word(cleaned);
        if is_greeting(first.to_lowercase().as_str()) {
            offset += consumed;
            cleaned = rest;
        }
        if cleaned.chars().count() < 2 {
            return None;
        }

        let lower = cleaned.to_lowercase();
        if lexicon.person_false_positives.contains(lower.as_str()) {
            return None;
        }

        let (first, consumed, rest) = split_first_word(cleaned);
        let first = first.to_lowercase();
        if lexicon.person_false_positives.contains(first.as_str()) || is_greeting(first.as_str()) {
            if rest.chars().count() < 2 {
                return None;
            }
            offset += consumed;
            cleaned = rest;
        }

        if is_fragment(cleaned) {
            return None;
        }

        let begin = start + offset;
        let end = begin + cleaned.len();
        let category = if lexicon.looks_like_company(&cleaned.to_lowercase()) {
            DetectionCategory::Organization
        } else {
            DetectionCategory::Name
        };
        Some(self.candidate(category, text, begin, end))
    }

    fn organization(&self, text: &str, start: usize, span: &str) -> Option<CandidateMatch> {
        let lower = span.to_lowercase();
        if self.lexicon.organization_false_positives.contains(lower.as_str()) || is_fragment(span)
        {
            return None;
        }
        Some(self.candidate(DetectionCategory::Organization, text, start, start + span.len()))
    }

    fn location(&self, text: &str, start: usize, span: &str) -> Option<CandidateMatch> {
        if is_fragment(span) {
            return None;
        }
        let lower = span.to_lowercase();
        if self.lexicon.location_false_positives.contains(lower.as_str()) {
            return None;
        }

        let (title, consumed, rest) = split_first_word(span);
        if self.lexicon.civility_titles.contains(title.to_lowercase().as_str()) {
            // Keep the title and the capitalized words following it
            let mut name_end = 0;
            let mut cursor = consumed;
            let mut remaining = rest;
            while !remaining.is_empty() {
                let (word, used, next) = split_first_word(remaining);
                let mut chars = word.chars();
                let capitalized = chars.next().is_some_and(char::is_uppercase)
                    && chars.clone().next().is_some()
                    && chars.all(char::is_lowercase);
                if !capitalized {
                    break;
                }
                name_end = cursor + word.len();
                cursor += used;
                remaining = next;
            }
            let end = if name_end > 0 {
                start + name_end
            } else {
                start + span.len()
            };
            return Some(self.candidate(DetectionCategory::Name, text, start, end));
        }

        if self.lexicon.common_places.contains(lower.as_str()) {
            return None;
        }
        Some(self.candidate(DetectionCategory::Location, text, start, start + span.len()))
    }

    fn misc(&self, text: &str, start: usize, span: &str) -> Option<CandidateMatch> {
        let end = start + span.len();
        if span.chars().any(|c| c.is_ascii_digit()) && span.chars().count() > 3 {
            return Some(self.candidate(DetectionCategory::Identifier, text, start, end));
        }
        if self.names.is_likely_person_name(span) {
            return Some(self.candidate(DetectionCategory::Name, text, start, end));
        }
        None
    }
}
