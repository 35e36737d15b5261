//! Activity and education-completion resolution.
//!
//! Both resolvers read the raw cell text kept on [`Person`] and classify it;
//! neither ever fails. A termination date that does not parse is treated as
//! "no termination date", so the person stays active. That fail-open policy
//! is deliberate: the rosters garble dates far more often than they omit
//! resigned staff, and dropping someone over a typo undercounts real
//! headcount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::Person;

/// Date spellings observed across roster vintages.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y년 %m월 %d일", "%Y%m%d"];

/// Legacy employment-status markers meaning "currently employed".
const ACTIVE_MARKERS: &[&str] = &["재직", "재직중", "정상", "근무중"];

/// Vocabulary meaning "completed" across the education platform's exports.
const COMPLETED_MARKERS: &[&str] = &["수료", "이수", "완료", "수료완료", "이수완료", "교육완료", "O", "Y"];

/// Try each known calendar format in turn. Time-of-day never appears in the
/// rosters; comparisons are calendar-date only.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Whether a person is employed as of the snapshot date.
///
/// Active when the legacy status marker says so, when no termination date
/// parses (fail-open), or when the termination date is strictly after
/// `as_of`.
pub fn is_active(person: &Person, as_of: NaiveDate) -> bool {
    if let Some(status) = person.status_raw.as_deref().map(str::trim) {
        if ACTIVE_MARKERS.contains(&status) {
            return true;
        }
    }
    match person.termination_date_raw.as_deref() {
        None => true,
        Some(raw) => match parse_flexible_date(raw) {
            None => true,
            Some(terminated_on) => terminated_on > as_of,
        },
    }
}

/// Education-completion states. `InProgress` means a status cell exists but
/// matches no known vocabulary term; it is a distinct state and must not be
/// folded into `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    None,
    Partial,
    Complete,
    InProgress,
}

impl CompletionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CompletionStatus::None => "none",
            CompletionStatus::Partial => "partial",
            CompletionStatus::Complete => "complete",
            CompletionStatus::InProgress => "in_progress",
        }
    }
}

enum TrainingFlag {
    Completed,
    Unrecognized,
    Absent,
}

fn training_flag(raw: Option<&str>) -> TrainingFlag {
    match raw.map(str::trim) {
        None | Some("") | Some("-") => TrainingFlag::Absent,
        Some(value) => {
            if COMPLETED_MARKERS
                .iter()
                .any(|marker| value.eq_ignore_ascii_case(marker))
            {
                TrainingFlag::Completed
            } else {
                TrainingFlag::Unrecognized
            }
        }
    }
}

/// Classify a person's education completion from the primary- and
/// advanced-training status cells.
pub fn classify_completion(person: &Person) -> CompletionStatus {
    let primary = training_flag(person.primary_training_raw.as_deref());
    let advanced = training_flag(person.advanced_training_raw.as_deref());

    match (&primary, &advanced) {
        (TrainingFlag::Completed, TrainingFlag::Completed) => CompletionStatus::Complete,
        (TrainingFlag::Completed, _) | (_, TrainingFlag::Completed) => CompletionStatus::Partial,
        (TrainingFlag::Unrecognized, _) | (_, TrainingFlag::Unrecognized) => {
            CompletionStatus::InProgress
        }
        (TrainingFlag::Absent, TrainingFlag::Absent) => CompletionStatus::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::JobType;

    fn person() -> Person {
        Person {
            name: "김영희".to_string(),
            job_type: JobType::CaseWorker,
            resident_id: None,
            hire_date_raw: None,
            termination_date_raw: None,
            status_raw: None,
            institution_code: None,
            institution_name_raw: String::new(),
            district_raw: String::new(),
            primary_training_raw: None,
            advanced_training_raw: None,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn parse_accepts_known_spellings() {
        for raw in ["2024-03-01", "2024.03.01", "2024/03/01", "20240301"] {
            assert_eq!(
                parse_flexible_date(raw),
                NaiveDate::from_ymd_opt(2024, 3, 1),
                "failed spelling: {raw}"
            );
        }
        assert_eq!(parse_flexible_date("-"), None);
        assert_eq!(parse_flexible_date("N/A"), None);
    }

    #[test]
    fn unparseable_termination_fails_open_to_active() {
        let mut p = person();
        p.termination_date_raw = Some("N/A".to_string());
        assert!(is_active(&p, as_of()));
    }

    #[test]
    fn termination_strictly_after_snapshot_is_still_active() {
        let mut p = person();
        p.termination_date_raw = Some("2025-07-01".to_string());
        assert!(is_active(&p, as_of()));

        p.termination_date_raw = Some("2025-06-30".to_string());
        assert!(!is_active(&p, as_of()));
    }

    #[test]
    fn legacy_active_marker_overrides_past_termination() {
        let mut p = person();
        p.status_raw = Some("재직".to_string());
        p.termination_date_raw = Some("2020-01-01".to_string());
        assert!(is_active(&p, as_of()));
    }

    #[test]
    fn completion_requires_both_trainings() {
        let mut p = person();
        p.primary_training_raw = Some("수료".to_string());
        p.advanced_training_raw = Some("이수완료".to_string());
        assert_eq!(classify_completion(&p), CompletionStatus::Complete);

        p.advanced_training_raw = None;
        assert_eq!(classify_completion(&p), CompletionStatus::Partial);
    }

    #[test]
    fn unknown_vocabulary_is_in_progress_not_none() {
        let mut p = person();
        p.primary_training_raw = Some("교육중".to_string());
        assert_eq!(classify_completion(&p), CompletionStatus::InProgress);

        p.primary_training_raw = None;
        assert_eq!(classify_completion(&p), CompletionStatus::None);
    }

    #[test]
    fn one_completed_one_unrecognized_counts_as_partial() {
        let mut p = person();
        p.primary_training_raw = Some("수료".to_string());
        p.advanced_training_raw = Some("진행중".to_string());
        assert_eq!(classify_completion(&p), CompletionStatus::Partial);
    }
}
