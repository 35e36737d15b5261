//! Per-institution aggregation of reconciled staffing facts.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};

use super::dedup::RawMatch;
use super::domain::{Institution, JobType, Person, StaffRole};
use super::status::parse_flexible_date;

/// Staff count as tenured once employed this many months.
const TENURE_MONTHS: u32 = 36;

/// Raw facts for one institution, derived from one deduplicated match set.
/// `has_real_match` records whether the headcounts came from reconciled
/// people or from the registry's own hired columns; the two must never be
/// silently merged.
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionMetrics {
    pub code: String,
    pub name: String,
    pub district: String,
    pub has_real_match: bool,
    pub social_workers: u32,
    pub life_support: u32,
    pub allocated_social: u32,
    pub allocated_life: u32,
    pub allocated_recipients: u32,
    pub staff_total: u32,
    pub tenured_staff: u32,
    pub experienced_social_workers: u32,
}

impl InstitutionMetrics {
    pub fn allocated_total(&self) -> u32 {
        self.allocated_social + self.allocated_life
    }

    pub fn actual_total(&self) -> u32 {
        self.social_workers + self.life_support
    }

    /// Actual headcount over allocated headcount, as a percentage.
    pub fn fill_rate(&self) -> f64 {
        let allocated = self.allocated_total();
        if allocated == 0 {
            return 0.0;
        }
        f64::from(self.actual_total()) / f64::from(allocated) * 100.0
    }

    /// Social workers as a fraction of all staff.
    pub fn social_worker_ratio(&self) -> f64 {
        let total = self.actual_total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.social_workers) / f64::from(total)
    }

    /// Fraction of staff with at least three years of tenure.
    pub fn tenure_fraction(&self) -> f64 {
        if self.staff_total == 0 {
            return 0.0;
        }
        f64::from(self.tenured_staff) / f64::from(self.staff_total)
    }

    /// Fraction of social workers holding the senior title.
    pub fn expertise_fraction(&self) -> f64 {
        if self.social_workers == 0 {
            return 0.0;
        }
        f64::from(self.experienced_social_workers) / f64::from(self.social_workers)
    }

    /// Funded service recipients per life-support worker. Infinite when the
    /// institution has recipients but nobody to serve them, which ranks it
    /// last on the service sub-score instead of dropping it.
    pub fn service_ratio(&self) -> f64 {
        if self.life_support == 0 {
            if self.allocated_recipients == 0 {
                return 0.0;
            }
            return f64::INFINITY;
        }
        f64::from(self.allocated_recipients) / f64::from(self.life_support)
    }
}

/// Roll deduplicated matches up into one metrics row per institution, in
/// registry order. Institutions with no reconciled staff fall back to the
/// registry's hired columns and are flagged `has_real_match = false`.
pub fn aggregate(
    institutions: &[Institution],
    persons: &[Person],
    matches: &[RawMatch],
    as_of: NaiveDate,
) -> Vec<InstitutionMetrics> {
    #[derive(Default)]
    struct Tally {
        social_workers: u32,
        life_support: u32,
        staff_total: u32,
        tenured_staff: u32,
        experienced_social_workers: u32,
    }

    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    for accepted in matches {
        let Some(person) = persons.get(accepted.person_index) else {
            continue;
        };
        let Some(role) = person.job_type.staff_role() else {
            continue;
        };
        let tally = tallies.entry(accepted.institution_code.as_str()).or_default();
        tally.staff_total += 1;
        match role {
            StaffRole::SocialWorker => {
                tally.social_workers += 1;
                if person.job_type == JobType::SeniorCaseWorker {
                    tally.experienced_social_workers += 1;
                }
            }
            StaffRole::LifeSupport => tally.life_support += 1,
        }
        if has_tenure(person, as_of) {
            tally.tenured_staff += 1;
        }
    }

    institutions
        .iter()
        .map(|institution| match tallies.get(institution.code.as_str()) {
            Some(tally) if tally.staff_total > 0 => InstitutionMetrics {
                code: institution.code.clone(),
                name: institution.name.clone(),
                district: institution.district.clone(),
                has_real_match: true,
                social_workers: tally.social_workers,
                life_support: tally.life_support,
                allocated_social: institution.allocated_social(),
                allocated_life: institution.allocated_life(),
                allocated_recipients: institution.allocated_recipients,
                staff_total: tally.staff_total,
                tenured_staff: tally.tenured_staff,
                experienced_social_workers: tally.experienced_social_workers,
            },
            _ => InstitutionMetrics {
                code: institution.code.clone(),
                name: institution.name.clone(),
                district: institution.district.clone(),
                has_real_match: false,
                social_workers: institution.hired_social_workers,
                life_support: institution.hired_life_support,
                allocated_social: institution.allocated_social(),
                allocated_life: institution.allocated_life(),
                allocated_recipients: institution.allocated_recipients,
                staff_total: institution.hired_social_workers + institution.hired_life_support,
                tenured_staff: 0,
                experienced_social_workers: 0,
            },
        })
        .collect()
}

/// Unparseable hire dates contribute no tenure (fail-open: the person still
/// counts in the denominator, just never as tenured).
fn has_tenure(person: &Person, as_of: NaiveDate) -> bool {
    person
        .hire_date_raw
        .as_deref()
        .and_then(parse_flexible_date)
        .and_then(|hired_on| hired_on.checked_add_months(Months::new(TENURE_MONTHS)))
        .map(|threshold| threshold <= as_of)
        .unwrap_or(false)
}
