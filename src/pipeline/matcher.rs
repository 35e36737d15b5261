//! Identity matching between roster rows and the institution registry.
//!
//! The rosters carry no reliable foreign key, so matching runs a cascade of
//! tiers from strict to loose and stops at the first success. Within a tier
//! the first institution in registry order wins, which keeps the result
//! deterministic for a given snapshot.

use serde::Serialize;

use super::domain::{Institution, Person};

/// Tier-5 acceptance threshold, taken as given from the source system.
const TOKEN_OVERLAP_THRESHOLD: f64 = 0.7;
/// Tier 5 only applies when both names are longer than this many characters.
const TOKEN_OVERLAP_MIN_CHARS: usize = 5;

/// Boilerplate tokens stripped before tier-3 containment checks, longest
/// spelling first so compound tokens are removed whole.
const GENERIC_SUFFIXES: &[&str] = &[
    "종합사회복지관",
    "노인종합복지관",
    "노인복지센터",
    "사회복지관",
    "노인복지관",
    "지원센터",
    "복지센터",
    "복지관",
    "복지원",
    "센터",
    "재단",
    "협회",
];

/// Domain category tokens for the tier-4 fallback.
const CATEGORY_TOKENS: &[&str] = &["노인", "복지", "시니어", "돌봄"];

/// Cascade tiers, strongest first. Variant order is the evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MatchMethod {
    Code,
    ExactName,
    DistrictKeyword,
    DistrictCategory,
    TokenOverlap,
}

impl MatchMethod {
    pub const fn ordered() -> [MatchMethod; 5] {
        [
            MatchMethod::Code,
            MatchMethod::ExactName,
            MatchMethod::DistrictKeyword,
            MatchMethod::DistrictCategory,
            MatchMethod::TokenOverlap,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchMethod::Code => "code",
            MatchMethod::ExactName => "exact_name",
            MatchMethod::DistrictKeyword => "district_keyword",
            MatchMethod::DistrictCategory => "district_category",
            MatchMethod::TokenOverlap => "token_overlap",
        }
    }

    fn accepts(self, person: &Person, institution: &Institution) -> bool {
        match self {
            MatchMethod::Code => code_matches(person, institution),
            MatchMethod::ExactName => exact_name_matches(person, institution),
            MatchMethod::DistrictKeyword => district_keyword_matches(person, institution),
            MatchMethod::DistrictCategory => district_category_matches(person, institution),
            MatchMethod::TokenOverlap => token_overlap_matches(person, institution),
        }
    }
}

/// A chosen institution plus the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstitutionMatch<'a> {
    pub institution: &'a Institution,
    pub method: MatchMethod,
}

/// Best institution for a person, or `None` when no tier succeeds. An
/// unmatched person stays unmatched; callers branch on it rather than
/// falling back to an arbitrary institution.
pub fn match_institution<'a>(
    person: &Person,
    institutions: &'a [Institution],
) -> Option<InstitutionMatch<'a>> {
    for method in MatchMethod::ordered() {
        if let Some(institution) = institutions
            .iter()
            .find(|institution| method.accepts(person, institution))
        {
            return Some(InstitutionMatch {
                institution,
                method,
            });
        }
    }
    None
}

fn code_matches(person: &Person, institution: &Institution) -> bool {
    match person.institution_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code == institution.code.trim(),
        _ => false,
    }
}

fn exact_name_matches(person: &Person, institution: &Institution) -> bool {
    let name = person.institution_name_raw.trim();
    !name.is_empty() && name == institution.name.trim()
}

fn district_keyword_matches(person: &Person, institution: &Institution) -> bool {
    if !districts_equal(person, institution) {
        return false;
    }
    let person_core = strip_generic_suffixes(&person.institution_name_raw);
    let registry_core = strip_generic_suffixes(&institution.name);
    if person_core.is_empty() || registry_core.is_empty() {
        return false;
    }
    person_core == registry_core
        || person_core.contains(&registry_core)
        || registry_core.contains(&person_core)
}

fn district_category_matches(person: &Person, institution: &Institution) -> bool {
    if !districts_equal(person, institution) {
        return false;
    }
    let person_name = person.institution_name_raw.trim();
    let registry_name = institution.name.trim();
    CATEGORY_TOKENS
        .iter()
        .any(|token| person_name.contains(token) && registry_name.contains(token))
}

fn token_overlap_matches(person: &Person, institution: &Institution) -> bool {
    let person_name = person.institution_name_raw.trim();
    let registry_name = institution.name.trim();
    if person_name.chars().count() <= TOKEN_OVERLAP_MIN_CHARS
        || registry_name.chars().count() <= TOKEN_OVERLAP_MIN_CHARS
    {
        return false;
    }
    char_containment_ratio(person_name, registry_name) > TOKEN_OVERLAP_THRESHOLD
}

fn districts_equal(person: &Person, institution: &Institution) -> bool {
    let district = person.district_raw.trim();
    !district.is_empty() && district == institution.district.trim()
}

fn strip_generic_suffixes(name: &str) -> String {
    let mut core = name.trim().to_string();
    for token in GENERIC_SUFFIXES {
        core = core.replace(token, "");
    }
    core.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fraction of the shorter name's characters found anywhere in the longer
/// name. Order-insensitive containment, not edit distance; source names are
/// abbreviated too inconsistently for positional comparison.
fn char_containment_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let total = shorter.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return 0.0;
    }
    let found = shorter
        .chars()
        .filter(|c| !c.is_whitespace() && longer.contains(*c))
        .count();
    found as f64 / total as f64
}
