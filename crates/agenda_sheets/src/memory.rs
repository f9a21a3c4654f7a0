// --- File: crates/agenda_sheets/src/memory.rs ---
//! Process-local implementation of [`TabularStore`].
//!
//! Used by the tests and by `backend = "memory"` for running the service
//! without a spreadsheet. Each operation takes the table lock for its own
//! duration only, so a read followed by a write is not atomic, matching the
//! remote store.

use agenda_common::{config_error, AgendaError, BoxFuture, Row, StoreError, TabularStore};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::cells::is_blank;

type Tables = HashMap<String, Vec<Row>>;

#[derive(Debug, Default)]
pub struct InMemorySheetStore {
    tables: Mutex<Tables>,
}

impl InMemorySheetStore {
    /// Create an empty store without any table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a table. `rows[0]` is the header row.
    pub fn with_table(self, name: &str, rows: Vec<Row>) -> Self {
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(name.to_string(), rows);
        }
        self
    }

    /// Builds a store from a JSON object mapping table names to row arrays.
    ///
    /// ```json
    /// { "Horarios": [["Data", "Hora", "Status"], ["2024-06-10", "09:00", "LIVRE"]] }
    /// ```
    pub fn from_seed_json(json: &str) -> Result<Self, AgendaError> {
        let tables: Tables = serde_json::from_str(json)
            .map_err(|e| config_error(format!("Arquivo de dados inicial inválido: {}", e)))?;
        Ok(Self {
            tables: Mutex::new(tables),
        })
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, AgendaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Não foi possível ler o arquivo de dados inicial {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_seed_json(&json)
    }

    /// Snapshot of a table, header included.
    pub fn table(&self, name: &str) -> Option<Vec<Row>> {
        self.tables.lock().ok()?.get(name).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("in-memory table lock poisoned".to_string()))
    }
}

// Number of rows up to and including the last row holding a non-blank cell.
fn used_rows(rows: &[Row]) -> usize {
    rows.iter()
        .rposition(|row| row.iter().any(|value| !is_blank(value)))
        .map_or(0, |index| index + 1)
}

fn clip(row: &Row, columns: usize) -> Row {
    row.iter().take(columns).cloned().collect()
}

impl TabularStore for InMemorySheetStore {
    fn has_table(&self, table: &str) -> BoxFuture<'_, bool, StoreError> {
        let table = table.to_string();
        Box::pin(async move { Ok(self.lock()?.contains_key(&table)) })
    }

    fn read_rows(
        &self,
        table: &str,
        first_row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Vec<Row>, StoreError> {
        let table = table.to_string();
        Box::pin(async move {
            let tables = self.lock()?;
            let rows = tables
                .get(&table)
                .ok_or_else(|| StoreError::TableNotFound(table.clone()))?;

            let first_index = first_row.max(1) - 1;
            let end = used_rows(rows);
            if first_index >= end {
                return Ok(Vec::new());
            }
            Ok(rows[first_index..end]
                .iter()
                .map(|row| clip(row, columns))
                .collect())
        })
    }

    fn read_row(
        &self,
        table: &str,
        row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Option<Row>, StoreError> {
        let table = table.to_string();
        Box::pin(async move {
            let tables = self.lock()?;
            let rows = tables
                .get(&table)
                .ok_or_else(|| StoreError::TableNotFound(table.clone()))?;

            if row == 0 {
                return Err(StoreError::RowOutOfRange { table, row });
            }
            if row > used_rows(rows) {
                return Ok(None);
            }
            Ok(rows.get(row - 1).map(|values| clip(values, columns)))
        })
    }

    fn write_cell(
        &self,
        table: &str,
        row: usize,
        column: usize,
        value: Value,
    ) -> BoxFuture<'_, (), StoreError> {
        let table = table.to_string();
        Box::pin(async move {
            let mut tables = self.lock()?;
            let rows = tables
                .get_mut(&table)
                .ok_or_else(|| StoreError::TableNotFound(table.clone()))?;

            if row == 0 || column == 0 {
                return Err(StoreError::RowOutOfRange { table, row });
            }
            if rows.len() < row {
                rows.resize_with(row, Vec::new);
            }
            let cells = &mut rows[row - 1];
            if cells.len() < column {
                cells.resize(column, Value::Null);
            }
            cells[column - 1] = value;
            Ok(())
        })
    }

    fn append_row(&self, table: &str, values: Row) -> BoxFuture<'_, (), StoreError> {
        let table = table.to_string();
        Box::pin(async move {
            let mut tables = self.lock()?;
            let rows = tables
                .get_mut(&table)
                .ok_or_else(|| StoreError::TableNotFound(table.clone()))?;

            let end = used_rows(rows);
            rows.truncate(end);
            rows.push(values);
            Ok(())
        })
    }
}
