//! Collapsing overlapping matcher output to one match per person.
//!
//! The matcher runs per roster row, and the rosters themselves repeat people
//! (re-hires, corrected rows, the same person reported by overlapping
//! heuristics). The first occurrence wins; the number of collapsed rows is a
//! data-quality signal and is reported, never hidden.

use std::collections::HashSet;

use super::domain::PersonKey;
use super::matcher::MatchMethod;

/// One accepted matcher result before deduplication. `person_index` points
/// back into the roster the match was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    pub person_key: PersonKey,
    pub person_index: usize,
    pub institution_code: String,
    pub method: MatchMethod,
}

/// Deduplicated matches plus the before/after counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    pub unique: Vec<RawMatch>,
    pub raw_count: usize,
    pub duplicate_count: usize,
}

/// Collapse to one match per [`PersonKey`], keeping input order. The key
/// falls back to the bare name when no resident id exists, so the duplicate
/// count overstates rather than understates collisions.
pub fn collapse(matches: Vec<RawMatch>) -> DedupOutcome {
    let raw_count = matches.len();
    let mut seen: HashSet<PersonKey> = HashSet::with_capacity(raw_count);
    let mut unique = Vec::with_capacity(raw_count);

    for candidate in matches {
        if seen.insert(candidate.person_key.clone()) {
            unique.push(candidate);
        }
    }

    let duplicate_count = raw_count - unique.len();
    DedupOutcome {
        unique,
        raw_count,
        duplicate_count,
    }
}
