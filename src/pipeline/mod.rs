//! The reconciliation and scoring core.
//!
//! One call to [`run`] takes an immutable [`Snapshot`] of the three rosters
//! plus the reporting date and produces the ranked institution report, the
//! per-person education statuses, the raw inventory, and structured match
//! diagnostics. The pass is pure and re-entrant: no clock reads, no shared
//! state, identical inputs yield identical outputs.

pub mod dedup;
pub mod domain;
pub mod fields;
pub mod matcher;
pub mod metrics;
pub mod report;
pub mod scoring;
pub mod status;

use chrono::NaiveDate;
use tracing::{debug, info};

use self::dedup::RawMatch;
pub use self::domain::{Institution, JobType, Person, PersonKey, Snapshot, StaffRole};
pub use self::report::{
    InstitutionInventory, MatchDiagnostics, PersonEducationStatus, RosterPassDiagnostics,
    ScoredInstitution,
};
pub use self::status::CompletionStatus;

/// Everything one reconciliation-and-scoring pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Eligible institutions, sorted descending by composite score.
    pub scored: Vec<ScoredInstitution>,
    /// One entry per active, reconciled education participant.
    pub education: Vec<PersonEducationStatus>,
    /// Every institution, including the ones the scorer excluded.
    pub inventory: Vec<InstitutionInventory>,
    pub diagnostics: MatchDiagnostics,
}

/// Run the full pipeline over one snapshot as of one reporting date.
pub fn run(snapshot: &Snapshot, as_of: NaiveDate) -> PipelineOutcome {
    let (employee_matches, employee_diagnostics) =
        reconcile_roster("employees", &snapshot.employees, &snapshot.institutions, as_of);

    let metric_rows = metrics::aggregate(
        &snapshot.institutions,
        &snapshot.employees,
        &employee_matches,
        as_of,
    );
    let ranked = scoring::score_population(&metric_rows);
    let scored: Vec<ScoredInstitution> = ranked.iter().map(ScoredInstitution::from_ranked).collect();
    let inventory: Vec<InstitutionInventory> = metric_rows
        .iter()
        .map(InstitutionInventory::from_metrics)
        .collect();

    let (participant_matches, participant_diagnostics) = reconcile_roster(
        "participants",
        &snapshot.participants,
        &snapshot.institutions,
        as_of,
    );
    let education: Vec<PersonEducationStatus> = participant_matches
        .iter()
        .filter_map(|accepted| {
            let person = snapshot.participants.get(accepted.person_index)?;
            let education_status = status::classify_completion(person);
            Some(PersonEducationStatus {
                name: person.name.trim().to_string(),
                resident_id: accepted.person_key.resident_id.clone(),
                institution_code: accepted.institution_code.clone(),
                job_type: person.job_type,
                job_type_label: person.job_type.label(),
                status: education_status,
                status_label: education_status.label(),
            })
        })
        .collect();

    let diagnostics = MatchDiagnostics {
        employees: employee_diagnostics,
        participants: participant_diagnostics,
        population_size: snapshot.institutions.len(),
        eligible_population: scored.len(),
    };

    info!(
        institutions = diagnostics.population_size,
        eligible = diagnostics.eligible_population,
        employee_duplicates = diagnostics.employees.duplicate_matches,
        employee_unmatched = diagnostics.employees.unmatched,
        participant_duplicates = diagnostics.participants.duplicate_matches,
        "snapshot reconciled and scored"
    );

    PipelineOutcome {
        scored,
        education,
        inventory,
        diagnostics,
    }
}

/// Match every active person in one roster, then collapse duplicates. The
/// counters come back alongside the matches instead of being logged from
/// inside the computation.
fn reconcile_roster(
    roster: &'static str,
    persons: &[Person],
    institutions: &[Institution],
    as_of: NaiveDate,
) -> (Vec<RawMatch>, RosterPassDiagnostics) {
    let mut raw: Vec<RawMatch> = Vec::with_capacity(persons.len());
    let mut unmatched = 0usize;

    for (person_index, person) in persons.iter().enumerate() {
        if !status::is_active(person, as_of) {
            continue;
        }
        match matcher::match_institution(person, institutions) {
            Some(found) => raw.push(RawMatch {
                person_key: PersonKey::of(person),
                person_index,
                institution_code: found.institution.code.clone(),
                method: found.method,
            }),
            None => unmatched += 1,
        }
    }

    let collapsed = dedup::collapse(raw);
    let diagnostics = RosterPassDiagnostics {
        raw_matches: collapsed.raw_count,
        unique_matches: collapsed.unique.len(),
        duplicate_matches: collapsed.duplicate_count,
        unmatched,
    };
    debug!(
        roster,
        raw = diagnostics.raw_matches,
        unique = diagnostics.unique_matches,
        duplicates = diagnostics.duplicate_matches,
        unmatched = diagnostics.unmatched,
        "roster reconciled"
    );
    (collapsed.unique, diagnostics)
}
