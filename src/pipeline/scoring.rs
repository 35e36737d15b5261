//! Relative scoring across the current institution population.
//!
//! Every sub-score is a 0–100 percentile rank within the population handed
//! to this pass, never an absolute scale. Scores from different populations
//! (a different snapshot, a filtered subset) are not comparable and are
//! never cached across runs.

use serde::Serialize;

use super::metrics::InstitutionMetrics;

/// One senior social worker per seventeen staff, taken as given from the
/// program guideline the source system encodes.
const IDEAL_SOCIAL_WORKER_RATIO: f64 = 1.0 / 17.0;
/// Target service recipients per life-support worker.
const SERVICE_RATIO_TARGET: f64 = 15.0;

const WEIGHT_FILL: f64 = 0.30;
const WEIGHT_BALANCE: f64 = 0.20;
const WEIGHT_STABILITY: f64 = 0.20;
const WEIGHT_EXPERTISE: f64 = 0.15;
const WEIGHT_SERVICE: f64 = 0.15;

/// The five percentile sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubScores {
    pub fill: u8,
    pub balance: u8,
    pub stability: u8,
    pub expertise: u8,
    pub service: u8,
}

/// One scored institution. `rank` is 1-based within the eligible population.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedInstitution {
    pub metrics: InstitutionMetrics,
    pub scores: SubScores,
    pub composite: u8,
    pub rank: u32,
}

enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// Score every institution with a positive allocation, returning them sorted
/// descending by composite score. The sort is stable, so input (registry)
/// order breaks composite ties.
pub fn score_population(metrics: &[InstitutionMetrics]) -> Vec<RankedInstitution> {
    let eligible: Vec<&InstitutionMetrics> = metrics
        .iter()
        .filter(|m| m.allocated_total() > 0)
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }

    let fill = percentile_scores(
        &collect(&eligible, |m| (m.fill_rate() - 100.0).abs()),
        Direction::LowerIsBetter,
    );
    let balance = percentile_scores(
        &collect(&eligible, |m| {
            (m.social_worker_ratio() - IDEAL_SOCIAL_WORKER_RATIO).abs()
        }),
        Direction::LowerIsBetter,
    );
    let stability = percentile_scores(
        &collect(&eligible, InstitutionMetrics::tenure_fraction),
        Direction::HigherIsBetter,
    );
    let expertise = percentile_scores(
        &collect(&eligible, InstitutionMetrics::expertise_fraction),
        Direction::HigherIsBetter,
    );
    let service = percentile_scores(
        &collect(&eligible, |m| (m.service_ratio() - SERVICE_RATIO_TARGET).abs()),
        Direction::LowerIsBetter,
    );

    let mut ranked: Vec<RankedInstitution> = eligible
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let scores = SubScores {
                fill: fill[i],
                balance: balance[i],
                stability: stability[i],
                expertise: expertise[i],
                service: service[i],
            };
            RankedInstitution {
                metrics: (*m).clone(),
                composite: composite(scores),
                scores,
                rank: 0,
            }
        })
        .collect();

    ranked.sort_by_key(|entry| std::cmp::Reverse(entry.composite));
    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    ranked
}

fn collect(eligible: &[&InstitutionMetrics], raw: impl Fn(&InstitutionMetrics) -> f64) -> Vec<f64> {
    eligible.iter().map(|m| raw(m)).collect()
}

fn composite(scores: SubScores) -> u8 {
    let weighted = WEIGHT_FILL * f64::from(scores.fill)
        + WEIGHT_BALANCE * f64::from(scores.balance)
        + WEIGHT_STABILITY * f64::from(scores.stability)
        + WEIGHT_EXPERTISE * f64::from(scores.expertise)
        + WEIGHT_SERVICE * f64::from(scores.service);
    weighted.round() as u8
}

/// Percentile rank per value: with `r` institutions strictly better, the
/// score is `round(((N − r) / N) × 100)`. One sort per metric; equal raw
/// values share the rank of their first sorted position, which reproduces
/// the strictly-better counting without the pairwise O(N²) scan.
fn percentile_scores(values: &[f64], direction: Direction) -> Vec<u8> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| match direction {
        Direction::LowerIsBetter => values[a].total_cmp(&values[b]),
        Direction::HigherIsBetter => values[b].total_cmp(&values[a]),
    });

    let mut scores = vec![0u8; n];
    let mut strictly_better = 0usize;
    for (position, &index) in order.iter().enumerate() {
        if position > 0 && values[index] != values[order[position - 1]] {
            strictly_better = position;
        }
        let score = ((n - strictly_better) as f64 / n as f64) * 100.0;
        scores[index] = score.round() as u8;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(code: &str, social: u32, life: u32, allocated: (u32, u32)) -> InstitutionMetrics {
        InstitutionMetrics {
            code: code.to_string(),
            name: format!("{code} 노인복지관"),
            district: "강남구".to_string(),
            has_real_match: true,
            social_workers: social,
            life_support: life,
            allocated_social: allocated.0,
            allocated_life: allocated.1,
            allocated_recipients: life * 15,
            staff_total: social + life,
            tenured_staff: 0,
            experienced_social_workers: 0,
        }
    }

    #[test]
    fn percentile_scores_stay_in_bounds() {
        let scores = percentile_scores(&[0.0, 3.0, 7.0, 7.0, 12.0], Direction::LowerIsBetter);
        assert!(scores.iter().all(|&s| s <= 100));
        assert_eq!(scores[0], 100);
        // Tied values share the same strictly-better count.
        assert_eq!(scores[2], scores[3]);
        assert_eq!(scores[4], 20);
    }

    #[test]
    fn direction_flips_which_end_wins() {
        let raw = [0.2, 0.8, 0.5];
        let lower = percentile_scores(&raw, Direction::LowerIsBetter);
        let higher = percentile_scores(&raw, Direction::HigherIsBetter);
        assert_eq!(lower[0], 100);
        assert_eq!(higher[1], 100);
    }

    #[test]
    fn ideal_staffing_balance_outranks_poor_balance() {
        // A: 1 social worker to 16 life support, the ideal 1/17 ratio.
        // B: 1 to 5. Equal fill rates.
        let population = vec![
            metrics("A", 1, 16, (1, 16)),
            metrics("B", 1, 5, (1, 5)),
        ];
        let ranked = score_population(&population);
        let a = ranked.iter().find(|r| r.metrics.code == "A").expect("A scored");
        let b = ranked.iter().find(|r| r.metrics.code == "B").expect("B scored");
        assert!(
            a.scores.balance > b.scores.balance,
            "A balance {} should exceed B balance {}",
            a.scores.balance,
            b.scores.balance
        );
    }

    #[test]
    fn zero_allocation_institutions_are_not_scored() {
        let population = vec![metrics("A", 1, 16, (1, 16)), metrics("Z", 0, 0, (0, 0))];
        let ranked = score_population(&population);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].metrics.code, "A");
    }

    #[test]
    fn composite_ties_keep_input_order_and_ranks_are_one_based() {
        let population = vec![
            metrics("A", 1, 16, (1, 16)),
            metrics("B", 1, 16, (1, 16)),
        ];
        let ranked = score_population(&population);
        assert_eq!(ranked[0].metrics.code, "A");
        assert_eq!(ranked[1].metrics.code, "B");
        assert_eq!(ranked[0].composite, ranked[1].composite);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn composite_applies_fixed_weights() {
        let scores = SubScores {
            fill: 100,
            balance: 50,
            stability: 50,
            expertise: 0,
            service: 0,
        };
        // 0.30*100 + 0.20*50 + 0.20*50 = 50
        assert_eq!(composite(scores), 50);
    }
}
