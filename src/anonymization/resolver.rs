//! Overlap resolution
//!
//! Candidates from independent detectors routinely collide (a postal code
//! inside a full address, a phone-shaped run inside a national ID). The
//! resolver keeps a maximal non-overlapping subset: longest span wins,
//! leftmost wins on equal length, and on identical spans the detector that
//! ran first wins.

use crate::anonymization::models::{AcceptedSet, CandidateMatch};

/// Order candidates by start ascending, then length descending. The sort is
/// stable, so identical spans keep collection order.
fn sort_for_resolution(candidates: &mut [CandidateMatch]) {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));
}

/// Resolve structured-phase candidates into an accepted set
pub fn resolve(mut candidates: Vec<CandidateMatch>) -> AcceptedSet {
    sort_for_resolution(&mut candidates);

    let mut accepted = AcceptedSet::new();
    for candidate in candidates {
        accepted.try_accept(candidate);
    }
    accepted
}

/// Add entity-phase candidates to an already resolved set.
///
/// Each candidate is checked against the resolved set (never the raw
/// structured candidates) and against entities admitted before it. Returns
/// the number admitted.
pub fn admit(accepted: &mut AcceptedSet, mut candidates: Vec<CandidateMatch>) -> usize {
    sort_for_resolution(&mut candidates);

    let mut admitted = 0;
    for candidate in candidates {
        if accepted.try_accept(candidate) {
            admitted += 1;
        }
    }
    admitted
}
