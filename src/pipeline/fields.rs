//! Field normalization over open, header-keyed records.
//!
//! The three source spreadsheets renamed their columns repeatedly over the
//! years, so every logical field owns an ordered alias table here and the
//! first non-empty cell wins. Call sites never probe headers directly.

use std::collections::BTreeMap;

/// One spreadsheet row as the loader saw it: header text mapped to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord(BTreeMap<String, String>);

impl RawRecord {
    pub fn new() -> Self {
        RawRecord(BTreeMap::new())
    }

    pub fn insert(&mut self, header: &str, value: &str) {
        self.0.insert(clean(header), clean(value));
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(String::as_str)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RawRecord {
    fn from(entries: [(&str, &str); N]) -> Self {
        let mut record = RawRecord::new();
        for (header, value) in entries {
            record.insert(header, value);
        }
        record
    }
}

/// Logical fields the engine understands, independent of header spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    Name,
    ResidentId,
    JobTitle,
    HireDate,
    TerminationDate,
    EmploymentStatus,
    InstitutionCode,
    InstitutionCodeLegacy,
    InstitutionName,
    District,
    Region,
    PrimaryTraining,
    AdvancedTraining,
    AllocatedSocialWorkers,
    AllocatedLifeSupport,
    BudgetSocialWorkers,
    BudgetLifeSupport,
    HiredSocialWorkers,
    HiredLifeSupport,
    AllocatedRecipients,
}

impl LogicalField {
    /// Ordered alias table, most recent header spelling first.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::Name => &["성명", "이름", "성 명"],
            LogicalField::ResidentId => &["주민등록번호", "주민번호", "생년월일"],
            LogicalField::JobTitle => &["직종", "직무구분", "직무", "구분"],
            LogicalField::HireDate => &["입사일", "입사일자", "채용일", "근무시작일"],
            LogicalField::TerminationDate => &["퇴사일", "퇴사일자", "퇴직일", "근무종료일"],
            LogicalField::EmploymentStatus => &["재직상태", "재직여부", "상태"],
            LogicalField::InstitutionCode => &["기관코드", "수행기관코드"],
            LogicalField::InstitutionCodeLegacy => &["기관기호", "기관번호"],
            LogicalField::InstitutionName => &["기관명", "수행기관명", "수행기관", "소속기관", "소속"],
            LogicalField::District => &["시군구", "시/군/구", "지역구", "지역"],
            LogicalField::Region => &["시도", "시/도", "광역시도"],
            LogicalField::PrimaryTraining => &["기본교육", "기본교육이수여부", "기본교육수료", "직무기본교육"],
            LogicalField::AdvancedTraining => &["심화교육", "심화교육이수여부", "심화교육수료", "직무심화교육"],
            LogicalField::AllocatedSocialWorkers => &["전담사회복지사배정", "배정전담사회복지사", "전담배정"],
            LogicalField::AllocatedLifeSupport => &["생활지원사배정", "배정생활지원사", "생활지원배정"],
            LogicalField::BudgetSocialWorkers => &["전담사회복지사예산", "예산전담사회복지사"],
            LogicalField::BudgetLifeSupport => &["생활지원사예산", "예산생활지원사"],
            LogicalField::HiredSocialWorkers => &["전담사회복지사채용", "채용전담사회복지사", "전담채용"],
            LogicalField::HiredLifeSupport => &["생활지원사채용", "채용생활지원사", "생활지원채용"],
            LogicalField::AllocatedRecipients => &["배정대상자", "대상자배정", "서비스대상자"],
        }
    }

    /// Date-like cells use `"-"` as a placeholder for "none".
    const fn date_like(self) -> bool {
        matches!(
            self,
            LogicalField::HireDate | LogicalField::TerminationDate
        )
    }
}

/// First non-empty cell among the field's aliases, or `None`. Absence is a
/// valid state, never an error.
pub fn resolve(record: &RawRecord, field: LogicalField) -> Option<&str> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| record.get(alias))
        .find(|value| !is_absent(value, field))
}

/// Like [`resolve`], defaulting to the empty string.
pub fn resolve_or_empty(record: &RawRecord, field: LogicalField) -> String {
    resolve(record, field).unwrap_or("").to_string()
}

/// Numeric cell resolution. Thousands separators are tolerated; anything
/// that still fails to parse coerces to zero rather than failing the row.
pub fn resolve_count(record: &RawRecord, field: LogicalField) -> u32 {
    resolve(record, field)
        .map(|value| value.replace(',', ""))
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(0)
}

fn is_absent(value: &str, field: LogicalField) -> bool {
    value.is_empty() || (field.date_like() && value == "-")
}

/// Strip BOM and zero-width characters, collapse interior whitespace.
pub(crate) fn clean(value: &str) -> String {
    let stripped = value.replace(['\u{feff}', '\u{200b}'], "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_empty_alias_wins() {
        let record = RawRecord::from([("기관명", ""), ("수행기관명", "강남시니어센터")]);
        assert_eq!(
            resolve(&record, LogicalField::InstitutionName),
            Some("강남시니어센터")
        );
    }

    #[test]
    fn dash_counts_as_absent_only_for_dates() {
        let record = RawRecord::from([("퇴사일", "-"), ("기관명", "-")]);
        assert_eq!(resolve(&record, LogicalField::TerminationDate), None);
        assert_eq!(resolve(&record, LogicalField::InstitutionName), Some("-"));
    }

    #[test]
    fn missing_aliases_resolve_to_default() {
        let record = RawRecord::new();
        assert_eq!(resolve(&record, LogicalField::Name), None);
        assert_eq!(resolve_or_empty(&record, LogicalField::District), "");
        assert_eq!(resolve_count(&record, LogicalField::AllocatedRecipients), 0);
    }

    #[test]
    fn counts_tolerate_thousands_separators_and_garbage() {
        let record = RawRecord::from([("배정대상자", "1,280"), ("전담배정", "두명")]);
        assert_eq!(resolve_count(&record, LogicalField::AllocatedRecipients), 1280);
        assert_eq!(
            resolve_count(&record, LogicalField::AllocatedSocialWorkers),
            0
        );
    }

    #[test]
    fn headers_and_cells_are_cleaned_of_bom_and_extra_whitespace() {
        let mut record = RawRecord::new();
        record.insert("\u{feff}기관명", "  강남  노인복지관 ");
        assert_eq!(
            resolve(&record, LogicalField::InstitutionName),
            Some("강남 노인복지관")
        );
    }
}
