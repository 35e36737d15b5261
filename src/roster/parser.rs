use std::io::Read;

use crate::pipeline::fields::RawRecord;

/// Read one spreadsheet export as header-keyed records. Header spellings are
/// unstable across vintages, so rows stay as string maps and the field
/// normalizer resolves logical fields later.
pub(crate) fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut record = RawRecord::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            record.insert(header, value);
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rows_become_header_keyed_records() {
        let csv = "성명,기관명,퇴사일\n김영희,강남노인복지관,-\n";
        let records = read_raw_records(Cursor::new(csv)).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("성명"), Some("김영희"));
        assert_eq!(records[0].get("기관명"), Some("강남노인복지관"));
        assert_eq!(records[0].get("퇴사일"), Some("-"));
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let csv = "성명,기관명,퇴사일\n김영희,강남노인복지관\n";
        let records = read_raw_records(Cursor::new(csv)).expect("parse");
        assert_eq!(records[0].get("퇴사일"), None);
    }
}
