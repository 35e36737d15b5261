//! CSV ingest adapters for the three source spreadsheets.
//!
//! These loaders own the only fallible surface of the crate: transport-level
//! CSV and IO failures. Malformed *cells* never fail a row; they resolve to
//! the documented defaults and the pipeline classifies them downstream.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::pipeline::domain::{Institution, JobType, Person};
use crate::pipeline::fields::{self, LogicalField, RawRecord};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Load the employee roster.
pub fn load_employees<R: Read>(reader: R) -> Result<Vec<Person>, RosterImportError> {
    load_persons(reader)
}

/// Load the education-participant roster. Same record shape as the employee
/// roster; the two are separate spreadsheets that merely overlap by name.
pub fn load_participants<R: Read>(reader: R) -> Result<Vec<Person>, RosterImportError> {
    load_persons(reader)
}

/// Load the institution registry.
pub fn load_institutions<R: Read>(reader: R) -> Result<Vec<Institution>, RosterImportError> {
    let records = parser::read_raw_records(reader)?;
    Ok(records.iter().map(institution_from_record).collect())
}

pub fn load_employees_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Person>, RosterImportError> {
    load_employees(std::fs::File::open(path)?)
}

pub fn load_participants_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Person>, RosterImportError> {
    load_participants(std::fs::File::open(path)?)
}

pub fn load_institutions_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Institution>, RosterImportError> {
    load_institutions(std::fs::File::open(path)?)
}

fn load_persons<R: Read>(reader: R) -> Result<Vec<Person>, RosterImportError> {
    let records = parser::read_raw_records(reader)?;
    Ok(records.iter().map(person_from_record).collect())
}

fn person_from_record(record: &RawRecord) -> Person {
    // The current code column wins over the legacy one when both exist.
    let institution_code = fields::resolve(record, LogicalField::InstitutionCode)
        .or_else(|| fields::resolve(record, LogicalField::InstitutionCodeLegacy))
        .map(str::to_string);

    Person {
        name: fields::resolve_or_empty(record, LogicalField::Name),
        job_type: JobType::from_raw(&fields::resolve_or_empty(record, LogicalField::JobTitle)),
        resident_id: fields::resolve(record, LogicalField::ResidentId).map(str::to_string),
        hire_date_raw: fields::resolve(record, LogicalField::HireDate).map(str::to_string),
        termination_date_raw: fields::resolve(record, LogicalField::TerminationDate)
            .map(str::to_string),
        status_raw: fields::resolve(record, LogicalField::EmploymentStatus).map(str::to_string),
        institution_code,
        institution_name_raw: fields::resolve_or_empty(record, LogicalField::InstitutionName),
        district_raw: fields::resolve_or_empty(record, LogicalField::District),
        primary_training_raw: fields::resolve(record, LogicalField::PrimaryTraining)
            .map(str::to_string),
        advanced_training_raw: fields::resolve(record, LogicalField::AdvancedTraining)
            .map(str::to_string),
    }
}

fn institution_from_record(record: &RawRecord) -> Institution {
    Institution {
        code: fields::resolve_or_empty(record, LogicalField::InstitutionCode),
        name: fields::resolve_or_empty(record, LogicalField::InstitutionName),
        district: fields::resolve_or_empty(record, LogicalField::District),
        region: fields::resolve_or_empty(record, LogicalField::Region),
        allocated_social_workers: fields::resolve_count(record, LogicalField::AllocatedSocialWorkers),
        allocated_life_support: fields::resolve_count(record, LogicalField::AllocatedLifeSupport),
        budget_social_workers: fields::resolve_count(record, LogicalField::BudgetSocialWorkers),
        budget_life_support: fields::resolve_count(record, LogicalField::BudgetLifeSupport),
        hired_social_workers: fields::resolve_count(record, LogicalField::HiredSocialWorkers),
        hired_life_support: fields::resolve_count(record, LogicalField::HiredLifeSupport),
        allocated_recipients: fields::resolve_count(record, LogicalField::AllocatedRecipients),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn employee_rows_build_typed_persons() {
        let csv = "성명,직종,기관기호,수행기관명,시군구,입사일,퇴사일\n\
                   김영희,전담사회복지사,A100,강남노인복지관,강남구,2022-03-01,-\n";
        let employees = load_employees(Cursor::new(csv)).expect("load employees");
        assert_eq!(employees.len(), 1);
        let person = &employees[0];
        assert_eq!(person.name, "김영희");
        assert_eq!(person.job_type, JobType::CaseWorker);
        // Legacy code header still resolves.
        assert_eq!(person.institution_code.as_deref(), Some("A100"));
        assert_eq!(person.termination_date_raw, None);
    }

    #[test]
    fn participant_rows_keep_raw_training_cells() {
        let csv = "이름,직무,소속기관,기본교육,심화교육\n박철수,생활지원사,서초재가센터,수료,진행중\n";
        let participants = load_participants(Cursor::new(csv)).expect("load participants");
        let person = &participants[0];
        assert_eq!(person.job_type, JobType::LifeSupportWorker);
        assert_eq!(person.primary_training_raw.as_deref(), Some("수료"));
        assert_eq!(person.advanced_training_raw.as_deref(), Some("진행중"));
    }

    #[test]
    fn institution_rows_parse_counts_softly() {
        let csv = "기관코드,기관명,시군구,시도,전담배정,생활지원배정,배정대상자\n\
                   A100,강남노인복지관,강남구,서울,2,열여섯,240\n";
        let institutions = load_institutions(Cursor::new(csv)).expect("load institutions");
        let institution = &institutions[0];
        assert_eq!(institution.code, "A100");
        assert_eq!(institution.allocated_social_workers, 2);
        // Unparseable count coerces to zero instead of failing the row.
        assert_eq!(institution.allocated_life_support, 0);
        assert_eq!(institution.allocated_recipients, 240);
    }

    #[test]
    fn path_loader_propagates_io_errors() {
        let error = load_employees_from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
