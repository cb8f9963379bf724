//! Candidate and accepted match types

use super::category::DetectionCategory;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A span proposed by a detector.
///
/// Offsets are UTF-8 byte offsets into the original input text, half-open
/// `[start, end)`. Only the replacement is rewritten after creation, when
/// tokens are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Category of the detected value
    pub category: DetectionCategory,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Exact substring of the input covered by the span
    pub original: String,
    /// Replacement text (token prefix until tokens are assigned)
    pub replacement: String,
}

impl CandidateMatch {
    /// Create a candidate from a span known to be valid for `text`
    pub fn new(
        category: DetectionCategory,
        text: &str,
        start: usize,
        end: usize,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            category,
            start,
            end,
            original: text[start..end].to_string(),
            replacement: replacement.into(),
        }
    }

    /// Create a candidate from an externally supplied span, validating it
    /// against `text` first.
    pub fn checked(
        category: DetectionCategory,
        text: &str,
        start: usize,
        end: usize,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        if start >= end || end > text.len() {
            bail!(
                "span [{start}, {end}) is outside text of length {}",
                text.len()
            );
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            bail!("span [{start}, {end}) does not fall on character boundaries");
        }
        Ok(Self::new(category, text, start, end, replacement))
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are never empty once constructed; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two half-open spans share at least one byte
    pub fn overlaps(&self, other: &CandidateMatch) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Whether `[start, end)` overlaps this span
    pub fn overlaps_span(&self, start: usize, end: usize) -> bool {
        self.start.max(start) < self.end.min(end)
    }

    /// Cut the span at its first line break or tab and drop trailing
    /// whitespace. Returns `None` if nothing is left.
    pub fn clip_at_layout_break(mut self) -> Option<Self> {
        let cut = self
            .original
            .find(['\n', '\r', '\t'])
            .unwrap_or(self.original.len());
        let kept = self.original[..cut].trim_end();
        if kept.is_empty() {
            return None;
        }
        self.end = self.start + kept.len();
        self.original.truncate(kept.len());
        Some(self)
    }
}

/// Set of mutually non-overlapping matches, kept sorted by start offset.
///
/// Produced by the overlap resolver; the only way to add a match is
/// [`AcceptedSet::try_accept`], which rejects anything that would overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcceptedSet {
    matches: Vec<CandidateMatch>,
}

impl AcceptedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Index where a span ending at `end` would be inserted, and whether the
    /// span `[start, end)` collides with an accepted match.
    fn locate(&self, start: usize, end: usize) -> (usize, bool) {
        // Accepted spans are disjoint and sorted, so their ends are sorted too:
        // only the last span starting before `end` can reach past `start`.
        let idx = self.matches.partition_point(|m| m.start < end);
        let collides = idx > 0 && self.matches[idx - 1].end > start;
        (idx, collides)
    }

    /// Accept the candidate unless it overlaps an accepted match
    pub fn try_accept(&mut self, candidate: CandidateMatch) -> bool {
        let (idx, collides) = self.locate(candidate.start, candidate.end);
        if collides {
            return false;
        }
        self.matches.insert(idx, candidate);
        true
    }

    /// Rewrite every replacement in ascending offset order
    pub fn assign_replacements<F>(&mut self, mut assign: F) -> Result<()>
    where
        F: FnMut(&CandidateMatch) -> Result<String>,
    {
        for m in &mut self.matches {
            m.replacement = assign(m)?;
        }
        Ok(())
    }

    /// Number of accepted matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing was accepted
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Accepted matches in ascending offset order
    pub fn as_slice(&self) -> &[CandidateMatch] {
        &self.matches
    }

    /// Iterate in ascending offset order
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateMatch> {
        self.matches.iter()
    }

    /// Consume the set, returning matches in ascending offset order
    pub fn into_vec(self) -> Vec<CandidateMatch> {
        self.matches
    }
}
