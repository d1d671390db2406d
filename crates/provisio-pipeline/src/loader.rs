//! CSV loading.
//!
//! Maps the spreadsheet's columns onto [`InputRow`] by header name,
//! case-insensitively. Unknown or extra columns are ignored; malformed
//! lines are skipped with a warning instead of failing the batch.

use std::collections::HashMap;

use provisio_core::models::row::InputRow;

use crate::error::PipelineError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const COLUMNS: &[&str] = &["name", "email", "department", "role", "join_date", "status"];

fn strip_utf8_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Parse raw CSV bytes into input rows.
pub fn parse_rows(data: &[u8]) -> Result<Vec<InputRow>, PipelineError> {
    let data = strip_utf8_bom(data);
    if data.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::Header(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut columns: HashMap<&str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(&known) = COLUMNS.iter().find(|&&c| c == header) {
            columns.entry(known).or_insert(idx);
        }
    }

    let field = |record: &csv::StringRecord, name: &str| -> String {
        columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // Header row is line 1, first data row line 2.
                tracing::warn!(line = idx + 2, error = %e, "skipping malformed row");
                continue;
            }
        };
        rows.push(InputRow {
            name: field(&record, "name"),
            email: field(&record, "email"),
            department: field(&record, "department"),
            role: field(&record, "role"),
            join_date: field(&record, "join_date"),
            status: field(&record, "status"),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_by_header_name() {
        let csv = b"name,email,department,role,join_date,status\n\
                    Alice,alice@company.com,Finance,Analyst,2025-11-15,active\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].department, "Finance");
        assert_eq!(rows[0].status, "active");
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = b"status,email,name,role,department,join_date\n\
                    active,bob@company.com,Bob,Engineer,IT,2025-11-18\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].email, "bob@company.com");
        assert_eq!(rows[0].department, "IT");
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let csv = b"name,email,department,role,join_date,status,badge_color\n\
                    Alice,alice@company.com,Finance,Analyst,2025-11-15,active,teal\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "active");
    }

    #[test]
    fn missing_columns_become_blank_fields() {
        let csv = b"name,email\nAlice,alice@company.com\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].department, "");
        assert_eq!(rows[0].status, "");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut csv = vec![0xEF, 0xBB, 0xBF];
        csv.extend_from_slice(b"name,email,department,role,join_date,status\n");
        csv.extend_from_slice(b"Alice,alice@company.com,Finance,Analyst,2025-11-15,active\n");
        let rows = parse_rows(&csv).unwrap();
        assert_eq!(rows[0].name, "Alice");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_rows(b""), Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn header_fields_match_case_insensitively() {
        let csv = b"Name,Email,Department,Role,Join_Date,Status\n\
                    Alice,alice@company.com,Finance,Analyst,2025-11-15,active\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].join_date, "2025-11-15");
    }
}
