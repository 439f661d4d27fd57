//! Certificate roster parsing. Accepts CSV or the first sheet of an XLSX
//! workbook; the header row must name every column in `REQUIRED_COLUMNS`.

use std::io::Cursor;

use calamine::{Reader, Xlsx, open_workbook_from_rs};

use crate::entities::sea_orm_active_enums::CertificateType;
use crate::error::{AppError, AppResult};

pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "name", "email", "event", "type"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// 1-based line number in the uploaded file, header included.
    pub line: usize,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub event: String,
    pub certificate_type: CertificateType,
}

pub fn parse_roster(file_name: &str, data: &[u8]) -> AppResult<Vec<RosterRow>> {
    let table = if file_name.to_lowercase().ends_with(".xlsx") {
        read_xlsx(data)?
    } else {
        read_csv(data)?
    };

    let (header, rows) = table
        .split_first()
        .ok_or_else(|| AppError::validation("Roster file is empty"))?;

    let positions = column_positions(header)?;

    let mut roster = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let line = idx + 2;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        roster.push(parse_row(line, row, &positions)?);
    }

    if roster.is_empty() {
        return Err(AppError::validation("Roster contains no rows"));
    }
    Ok(roster)
}

fn read_csv(data: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(data);

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|e| AppError::validation(format!("Failed to read roster CSV: {}", e)))
        })
        .collect()
}

fn read_xlsx(data: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let cursor = Cursor::new(data.to_vec());
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| AppError::validation(format!("Failed to open roster workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| AppError::validation("Roster workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| AppError::validation(format!("Failed to read roster sheet: {}", e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .collect())
}

fn column_positions(header: &[String]) -> AppResult<[usize; 5]> {
    let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();

    let mut positions = [0usize; 5];
    let mut missing = Vec::new();
    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        match normalized.iter().position(|h| h == column) {
            Some(pos) => positions[slot] = pos,
            None => missing.push(*column),
        }
    }

    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Roster is missing required column(s): {}",
            missing.join(", ")
        )));
    }
    Ok(positions)
}

fn parse_row(line: usize, row: &[String], positions: &[usize; 5]) -> AppResult<RosterRow> {
    let cell = |slot: usize| -> AppResult<String> {
        let value = row
            .get(positions[slot])
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if value.is_empty() {
            return Err(AppError::validation(format!(
                "Row {}: {} is required",
                line, REQUIRED_COLUMNS[slot]
            )));
        }
        Ok(value)
    };

    let raw_type = cell(4)?;
    let certificate_type = CertificateType::parse(&raw_type).ok_or_else(|| {
        AppError::validation(format!(
            "Row {}: invalid certificate type '{}', expected participation or achievement",
            line, raw_type
        ))
    })?;

    Ok(RosterRow {
        line,
        student_id: cell(0)?,
        name: cell(1)?,
        email: cell(2)?,
        event: cell(3)?,
        certificate_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_roster() {
        let csv = "id,name,email,event,type\n\
                   STU004,Alice Johnson,alice@student.edu,Tech Symposium 2025,participation\n\
                   STU005, Bob Williams ,bob@student.edu,Tech Symposium 2025,Achievement\n";

        let roster = parse_roster("roster.csv", csv.as_bytes()).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].student_id, "STU004");
        assert_eq!(roster[0].line, 2);
        assert_eq!(roster[1].name, "Bob Williams");
        assert_eq!(roster[1].certificate_type, CertificateType::Achievement);
    }

    #[test]
    fn test_columns_may_come_in_any_order() {
        let csv = "Type,Event,ID,Email,Name\nparticipation,Hackathon,STU010,c@x.edu,Carol\n";

        let roster = parse_roster("roster.csv", csv.as_bytes()).unwrap();

        assert_eq!(roster[0].student_id, "STU010");
        assert_eq!(roster[0].event, "Hackathon");
        assert_eq!(roster[0].name, "Carol");
    }

    #[test]
    fn test_missing_column_rejects_whole_roster() {
        let csv = "id,name,event,type\nSTU004,Alice,Fest,participation\n";

        let err = parse_roster("roster.csv", csv.as_bytes()).unwrap_err();

        assert_eq!(message(err), "Roster is missing required column(s): email");
    }

    #[test]
    fn test_bad_type_reports_line() {
        let csv = "id,name,email,event,type\nSTU004,Alice,a@x.edu,Fest,participation\nSTU005,Bob,b@x.edu,Fest,winner\n";

        let err = parse_roster("roster.csv", csv.as_bytes()).unwrap_err();

        assert!(message(err).starts_with("Row 3: invalid certificate type 'winner'"));
    }

    #[test]
    fn test_blank_cell_and_empty_roster() {
        let csv = "id,name,email,event,type\n,Alice,a@x.edu,Fest,participation\n";
        assert_eq!(
            message(parse_roster("roster.csv", csv.as_bytes()).unwrap_err()),
            "Row 2: id is required"
        );

        let header_only = "id,name,email,event,type\n";
        assert_eq!(
            message(parse_roster("roster.csv", header_only.as_bytes()).unwrap_err()),
            "Roster contains no rows"
        );
    }

    #[test]
    fn test_ragged_csv_is_rejected() {
        let csv = "id,name,email,event,type\nSTU004,Alice\n";

        let err = parse_roster("roster.csv", csv.as_bytes()).unwrap_err();

        assert!(message(err).starts_with("Failed to read roster CSV"));
    }
}
