//! CSV and spreadsheet text extraction
//!
//! Tabular data is flattened to one line per row, cells joined by ", ", so
//! that chunking and retrieval see plain text.

use crate::error::{Error, Result};
use calamine::{Reader, Xlsx};
use std::io::Cursor;

/// Extract text from CSV bytes
pub fn extract_csv(bytes: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::Extraction(format!("CSV parse failed: {}", e)))?;
        let cells: Vec<&str> = record.iter().map(str::trim).collect();
        if cells.iter().any(|c| !c.is_empty()) {
            lines.push(cells.join(", "));
        }
    }

    Ok(lines.join("\n"))
}

/// Extract text from XLSX bytes, sheet by sheet
pub fn extract_xlsx(bytes: &[u8]) -> Result<String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("XLSX open failed: {}", e)))?;

    let mut lines = Vec::new();
    let sheet_names = workbook.sheet_names().to_vec();
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::Extraction(format!("XLSX sheet '{}' unreadable: {}", name, e)))?;

        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.to_string())
                .map(|s| s.trim().to_string())
                .collect();
            if cells.iter().any(|c| !c.is_empty()) {
                lines.push(cells.join(", "));
            }
        }
    }

    Ok(lines.join("\n"))
}
