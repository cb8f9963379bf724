//! Layout-preserving substitution and token reversal

use crate::anonymization::models::{CandidateMatch, MappingSummary};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashMap;

/// Build the output text from non-overlapping matches sorted by start.
///
/// One ascending pass: copy the untouched segment before each match, then
/// its replacement. Every byte outside a match is copied verbatim.
pub fn apply(text: &str, matches: &[CandidateMatch]) -> Result<String> {
    let extra: usize = matches.iter().map(|m| m.replacement.len()).sum();
    let mut output = String::with_capacity(text.len() + extra);
    let mut cursor = 0;

    for m in matches {
        if m.start < cursor {
            bail!(
                "match [{}, {}) overlaps or precedes a previous match ending at {cursor}",
                m.start,
                m.end
            );
        }
        let segment = text
            .get(cursor..m.start)
            .with_context(|| format!("span [{}, {}) does not fit the input", m.start, m.end))?;
        if text.get(m.start..m.end) != Some(m.original.as_str()) {
            bail!(
                "span [{}, {}) no longer matches its original value",
                m.start,
                m.end
            );
        }
        output.push_str(segment);
        output.push_str(&m.replacement);
        cursor = m.end;
    }

    output.push_str(&text[cursor..]);
    Ok(output)
}

/// Replace every token of `mapping` in `text` with its original value.
///
/// Tokens are matched longest first in a single left-to-right scan, so
/// `[NAME_1]` never shadows `[NAME_10]` and restored values are never
/// rescanned. When one token maps back to several originals (reordered
/// names), the lexicographically first original is used.
pub fn deanonymize(text: &str, mapping: &MappingSummary) -> Result<String> {
    let mut reverse: HashMap<&str, &str> = HashMap::new();
    for values in mapping.values() {
        for (original, token) in values {
            reverse.entry(token.as_str()).or_insert(original.as_str());
        }
    }
    if reverse.is_empty() {
        return Ok(text.to_string());
    }

    let mut tokens: Vec<&str> = reverse.keys().copied().collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&alternation).context("Failed to build token pattern")?;

    Ok(pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            reverse.get(&caps[0]).copied().unwrap_or(&caps[0]).to_string()
        })
        .into_owned())
}
