//! Serializable output views consumed by the presentation layers.

use serde::Serialize;

use super::domain::JobType;
use super::metrics::InstitutionMetrics;
use super::scoring::RankedInstitution;
use super::status::CompletionStatus;

/// One ranked row of the institution report. Scores are percentile ranks
/// relative to the population of the run that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredInstitution {
    pub code: String,
    pub name: String,
    pub district: String,
    pub has_real_match: bool,
    pub social_workers: u32,
    pub life_support: u32,
    pub allocated_social: u32,
    pub allocated_life: u32,
    pub fill_rate: f64,
    pub fill_score: u8,
    pub balance_score: u8,
    pub stability_score: u8,
    pub expertise_score: u8,
    pub service_score: u8,
    pub composite_score: u8,
    pub rank: u32,
}

impl ScoredInstitution {
    pub(crate) fn from_ranked(ranked: &RankedInstitution) -> Self {
        ScoredInstitution {
            code: ranked.metrics.code.clone(),
            name: ranked.metrics.name.clone(),
            district: ranked.metrics.district.clone(),
            has_real_match: ranked.metrics.has_real_match,
            social_workers: ranked.metrics.social_workers,
            life_support: ranked.metrics.life_support,
            allocated_social: ranked.metrics.allocated_social,
            allocated_life: ranked.metrics.allocated_life,
            fill_rate: ranked.metrics.fill_rate(),
            fill_score: ranked.scores.fill,
            balance_score: ranked.scores.balance,
            stability_score: ranked.scores.stability,
            expertise_score: ranked.scores.expertise,
            service_score: ranked.scores.service,
            composite_score: ranked.composite,
            rank: ranked.rank,
        }
    }
}

/// Raw inventory row. Every institution appears here, including the
/// zero-allocation ones the scorer excludes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionInventory {
    pub code: String,
    pub name: String,
    pub district: String,
    pub has_real_match: bool,
    pub social_workers: u32,
    pub life_support: u32,
    pub allocated_social: u32,
    pub allocated_life: u32,
    pub allocated_recipients: u32,
    pub scoring_eligible: bool,
}

impl InstitutionInventory {
    pub(crate) fn from_metrics(metrics: &InstitutionMetrics) -> Self {
        InstitutionInventory {
            code: metrics.code.clone(),
            name: metrics.name.clone(),
            district: metrics.district.clone(),
            has_real_match: metrics.has_real_match,
            social_workers: metrics.social_workers,
            life_support: metrics.life_support,
            allocated_social: metrics.allocated_social,
            allocated_life: metrics.allocated_life,
            allocated_recipients: metrics.allocated_recipients,
            scoring_eligible: metrics.allocated_total() > 0,
        }
    }
}

/// Education standing for one active, reconciled participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonEducationStatus {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_id: Option<String>,
    pub institution_code: String,
    pub job_type: JobType,
    pub job_type_label: &'static str,
    pub status: CompletionStatus,
    pub status_label: &'static str,
}

/// Match-quality counters for one roster pass through the matcher and the
/// deduplicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterPassDiagnostics {
    pub raw_matches: usize,
    pub unique_matches: usize,
    pub duplicate_matches: usize,
    pub unmatched: usize,
}

/// Structured diagnostics for a full pipeline run. The duplicate counts are
/// a data-quality signal in their own right, not a debug artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchDiagnostics {
    pub employees: RosterPassDiagnostics,
    pub participants: RosterPassDiagnostics,
    pub population_size: usize,
    pub eligible_population: usize,
}
