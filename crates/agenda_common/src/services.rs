// --- File: crates/agenda_common/src/services.rs ---
//! Store abstraction for the spreadsheet backing the service.
//!
//! The booking logic only ever reads ranges, reads a single row, overwrites a
//! single cell and appends a row. Keeping these four operations behind a trait
//! lets the handlers run against Google Sheets in production and against an
//! in-memory table in tests.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// One spreadsheet row, cells in column order starting at column A.
/// Trailing empty cells may be missing.
pub type Row = Vec<Value>;

/// Errors reported by a tabular store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("row {row} is outside the data range of {table}")]
    RowOutOfRange { table: String, row: usize },

    #[error("invalid cell {table}!{cell}: {reason}")]
    InvalidCell {
        table: String,
        cell: String,
        reason: String,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// A trait for tabular store operations.
///
/// Rows and columns are 1-based, as in spreadsheet A1 notation. Row 1 of every
/// table is a header row.
pub trait TabularStore: Send + Sync {
    /// Whether a table with this name exists.
    fn has_table(&self, table: &str) -> BoxFuture<'_, bool, StoreError>;

    /// Reads `columns` cells of every row from `first_row` to the last non-empty row.
    ///
    /// Returns an empty vector when the table has no rows at or after `first_row`.
    fn read_rows(
        &self,
        table: &str,
        first_row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Vec<Row>, StoreError>;

    /// Reads `columns` cells of a single row. `None` when the row is past the end of the table.
    fn read_row(
        &self,
        table: &str,
        row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Option<Row>, StoreError>;

    /// Overwrites a single cell.
    fn write_cell(
        &self,
        table: &str,
        row: usize,
        column: usize,
        value: Value,
    ) -> BoxFuture<'_, (), StoreError>;

    /// Appends a row after the last non-empty row.
    fn append_row(&self, table: &str, values: Row) -> BoxFuture<'_, (), StoreError>;
}

/// Converts a 1-based column number to its A1 letter form (1 -> A, 27 -> AA).
pub fn column_letter(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Builds an A1 range such as `Horarios!A2:C` or `Horarios!A5:C5`.
pub fn a1_range(table: &str, first_row: usize, last_row: Option<usize>, columns: usize) -> String {
    let last_column = column_letter(columns.max(1));
    match last_row {
        Some(last) => format!("{}!A{}:{}{}", quote_table(table), first_row, last_column, last),
        None => format!("{}!A{}:{}", quote_table(table), first_row, last_column),
    }
}

/// Builds the A1 reference of a single cell, e.g. `Horarios!C7`.
pub fn a1_cell(table: &str, row: usize, column: usize) -> String {
    format!("{}!{}{}", quote_table(table), column_letter(column), row)
}

// Sheet names with spaces or punctuation must be single-quoted in A1 notation.
fn quote_table(table: &str) -> String {
    if table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        table.to_string()
    } else {
        format!("'{}'", table.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(3), "C");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
    }

    #[test]
    fn test_a1_ranges() {
        assert_eq!(a1_range("Horarios", 2, None, 3), "Horarios!A2:C");
        assert_eq!(a1_range("Horarios", 5, Some(5), 3), "Horarios!A5:C5");
        assert_eq!(a1_cell("Horarios", 7, 3), "Horarios!C7");
    }

    #[test]
    fn test_table_names_are_quoted_when_needed() {
        assert_eq!(a1_cell("Minha Agenda", 2, 1), "'Minha Agenda'!A2");
        assert_eq!(a1_cell("Horários", 2, 1), "'Horários'!A2");
        assert_eq!(a1_cell("O'Brien", 2, 1), "'O''Brien'!A2");
    }
}
