use serde::{Deserialize, Serialize};

/// Fixed job vocabulary used across both rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    SeniorCaseWorker,
    CaseWorker,
    LifeSupportWorker,
    Other,
}

impl JobType {
    /// Classify a raw job-title cell. The rosters mix several historical
    /// spellings; classification is containment-based rather than exact.
    pub fn from_raw(raw: &str) -> Self {
        let title = raw.trim();
        if title.contains("선임") {
            JobType::SeniorCaseWorker
        } else if title.contains("전담") || title.contains("사회복지") {
            JobType::CaseWorker
        } else if title.contains("생활지원") {
            JobType::LifeSupportWorker
        } else {
            JobType::Other
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            JobType::SeniorCaseWorker => "senior_case_worker",
            JobType::CaseWorker => "case_worker",
            JobType::LifeSupportWorker => "life_support_worker",
            JobType::Other => "other",
        }
    }

    /// Headcount bucket for institution metrics. `Other` belongs to neither
    /// bucket and is excluded from staffing counts.
    pub const fn staff_role(self) -> Option<StaffRole> {
        match self {
            JobType::SeniorCaseWorker | JobType::CaseWorker => Some(StaffRole::SocialWorker),
            JobType::LifeSupportWorker => Some(StaffRole::LifeSupport),
            JobType::Other => None,
        }
    }
}

/// The two staffing buckets allocations are budgeted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    SocialWorker,
    LifeSupport,
}

/// One roster row for a tracked human. Date-like and status fields keep the
/// raw cell text because downstream policy (fail-open on unparseable dates,
/// unknown-vocabulary detection) needs to distinguish absent from garbled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub job_type: JobType,
    pub resident_id: Option<String>,
    pub hire_date_raw: Option<String>,
    pub termination_date_raw: Option<String>,
    pub status_raw: Option<String>,
    pub institution_code: Option<String>,
    pub institution_name_raw: String,
    pub district_raw: String,
    pub primary_training_raw: Option<String>,
    pub advanced_training_raw: Option<String>,
}

/// Deduplication key. Falls back to the bare name when no resident id was
/// captured, which is unsafe for common surnames; collapses under this key
/// are therefore counted and surfaced, never silent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PersonKey {
    pub name: String,
    pub resident_id: Option<String>,
}

impl PersonKey {
    pub fn of(person: &Person) -> Self {
        PersonKey {
            name: person.name.trim().to_string(),
            resident_id: person
                .resident_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

/// One registry row. `code` is the only authoritative key in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub code: String,
    pub name: String,
    pub district: String,
    pub region: String,
    pub allocated_social_workers: u32,
    pub allocated_life_support: u32,
    pub budget_social_workers: u32,
    pub budget_life_support: u32,
    pub hired_social_workers: u32,
    pub hired_life_support: u32,
    pub allocated_recipients: u32,
}

impl Institution {
    /// Course allocation when positive, else the budget allocation. The two
    /// registries historically disagree; the course column is the
    /// operational number.
    pub fn allocated_social(&self) -> u32 {
        if self.allocated_social_workers > 0 {
            self.allocated_social_workers
        } else {
            self.budget_social_workers
        }
    }

    pub fn allocated_life(&self) -> u32 {
        if self.allocated_life_support > 0 {
            self.allocated_life_support
        } else {
            self.budget_life_support
        }
    }

    pub fn allocated_total(&self) -> u32 {
        self.allocated_social() + self.allocated_life()
    }
}

/// One dated import of the three rosters, immutable for one computation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub employees: Vec<Person>,
    pub participants: Vec<Person>,
    pub institutions: Vec<Institution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_titles_classify_by_containment() {
        assert_eq!(
            JobType::from_raw("선임전담사회복지사"),
            JobType::SeniorCaseWorker
        );
        assert_eq!(JobType::from_raw("전담사회복지사"), JobType::CaseWorker);
        assert_eq!(JobType::from_raw(" 생활지원사 "), JobType::LifeSupportWorker);
        assert_eq!(JobType::from_raw("행정보조"), JobType::Other);
    }

    #[test]
    fn person_key_ignores_blank_resident_ids() {
        let key = PersonKey {
            name: "김영희".to_string(),
            resident_id: None,
        };
        let person = Person {
            name: " 김영희 ".to_string(),
            job_type: JobType::CaseWorker,
            resident_id: Some("  ".to_string()),
            hire_date_raw: None,
            termination_date_raw: None,
            status_raw: None,
            institution_code: None,
            institution_name_raw: String::new(),
            district_raw: String::new(),
            primary_training_raw: None,
            advanced_training_raw: None,
        };
        assert_eq!(PersonKey::of(&person), key);
    }

    #[test]
    fn allocation_falls_back_to_budget_column() {
        let institution = Institution {
            code: "A100".to_string(),
            name: "강남노인복지관".to_string(),
            district: "강남구".to_string(),
            region: "서울".to_string(),
            allocated_social_workers: 0,
            allocated_life_support: 16,
            budget_social_workers: 2,
            budget_life_support: 20,
            hired_social_workers: 1,
            hired_life_support: 15,
            allocated_recipients: 240,
        };
        assert_eq!(institution.allocated_social(), 2);
        assert_eq!(institution.allocated_life(), 16);
        assert_eq!(institution.allocated_total(), 18);
    }
}
