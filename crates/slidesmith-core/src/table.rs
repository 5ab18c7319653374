//! Table slide validation and cell-fill request sequences.

use serde_json::Value;

use crate::error::DeckError;
use crate::requests;

/// Reject malformed table input before any remote call is attempted.
pub fn validate_table(headers: &[String], rows: &[Vec<String>]) -> Result<(), DeckError> {
    if headers.is_empty() {
        return Err(DeckError::invalid("Table headers are required"));
    }
    if rows.is_empty() {
        return Err(DeckError::invalid("Table rows are required"));
    }
    if rows.iter().any(|row| row.len() != headers.len()) {
        return Err(DeckError::invalid(
            "All rows must have the same number of columns as headers",
        ));
    }
    Ok(())
}

/// Header row: insert each cell's text and bold it.
pub fn header_requests(table_id: &str, headers: &[String]) -> Vec<Value> {
    let mut batch = Vec::with_capacity(headers.len() * 2);
    for (column, header) in headers.iter().enumerate() {
        batch.push(requests::insert_table_cell_text(table_id, 0, column, header));
        batch.push(requests::bold_table_cell(table_id, 0, column));
    }
    batch
}

/// Data rows, offset by one to skip the header row.
pub fn data_requests(table_id: &str, rows: &[Vec<String>]) -> Vec<Value> {
    let mut batch = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (column, cell) in row.iter().enumerate() {
            batch.push(requests::insert_table_cell_text(
                table_id,
                row_index + 1,
                column,
                cell,
            ));
        }
    }
    batch
}
