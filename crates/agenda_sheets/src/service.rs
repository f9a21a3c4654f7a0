// --- File: crates/agenda_sheets/src/service.rs ---
//! Google Sheets implementation of the [`TabularStore`] trait.

use agenda_common::services::{a1_cell, a1_range};
use agenda_common::{BoxFuture, Row, StoreError, TabularStore};
use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::auth::HubType;

/// Store backed by one Google spreadsheet; each table is a sheet (tab) of it.
pub struct GoogleSheetsStore {
    hub: Arc<HubType>,
    spreadsheet_id: String,
}

impl GoogleSheetsStore {
    pub fn new(hub: Arc<HubType>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            hub,
            spreadsheet_id: spreadsheet_id.into(),
        }
    }
}

// The API answers 400 "Unable to parse range" when the sheet name does not exist.
fn map_api_error(table: &str, err: google_sheets4::Error) -> StoreError {
    let message = err.to_string();
    if message.contains("Unable to parse range") {
        StoreError::TableNotFound(table.to_string())
    } else {
        StoreError::Backend(format!("Google Sheets API error: {}", message))
    }
}

impl TabularStore for GoogleSheetsStore {
    fn has_table(&self, table: &str) -> BoxFuture<'_, bool, StoreError> {
        let table = table.to_string();
        let hub = self.hub.clone();

        Box::pin(async move {
            let (_response, spreadsheet) = hub
                .spreadsheets()
                .get(&self.spreadsheet_id)
                .param("fields", "sheets.properties.title")
                .doit()
                .await
                .map_err(|e| map_api_error(&table, e))?;

            let sheets = spreadsheet.sheets.unwrap_or_default();
            let found = sheets
                .iter()
                .filter_map(|sheet| sheet.properties.as_ref()?.title.as_deref())
                .any(|title| title == table);
            Ok(found)
        })
    }

    fn read_rows(
        &self,
        table: &str,
        first_row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Vec<Row>, StoreError> {
        let table = table.to_string();
        let hub = self.hub.clone();

        Box::pin(async move {
            let range = a1_range(&table, first_row, None, columns);
            debug!("Reading {}", range);

            let (_response, value_range) = hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, &range)
                .value_render_option("UNFORMATTED_VALUE")
                .date_time_render_option("SERIAL_NUMBER")
                .major_dimension("ROWS")
                .doit()
                .await
                .map_err(|e| map_api_error(&table, e))?;

            Ok(value_range.values.unwrap_or_default())
        })
    }

    fn read_row(
        &self,
        table: &str,
        row: usize,
        columns: usize,
    ) -> BoxFuture<'_, Option<Row>, StoreError> {
        let table = table.to_string();
        let hub = self.hub.clone();

        Box::pin(async move {
            if row == 0 {
                return Err(StoreError::RowOutOfRange { table, row });
            }
            let range = a1_range(&table, row, Some(row), columns);
            debug!("Reading {}", range);

            let (_response, value_range) = hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, &range)
                .value_render_option("UNFORMATTED_VALUE")
                .date_time_render_option("SERIAL_NUMBER")
                .major_dimension("ROWS")
                .doit()
                .await
                .map_err(|e| map_api_error(&table, e))?;

            // The API omits `values` for rows without any content.
            Ok(value_range
                .values
                .and_then(|rows| rows.into_iter().next()))
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
        let hub = self.hub.clone();

        Box::pin(async move {
            let cell = a1_cell(&table, row, column);
            debug!("Writing {}", cell);

            let request = ValueRange {
                range: Some(cell.clone()),
                major_dimension: Some("ROWS".to_string()),
                values: Some(vec![vec![value]]),
            };
            hub.spreadsheets()
                .values_update(request, &self.spreadsheet_id, &cell)
                .value_input_option("RAW")
                .doit()
                .await
                .map_err(|e| map_api_error(&table, e))?;
            Ok(())
        })
    }

    fn append_row(&self, table: &str, values: Row) -> BoxFuture<'_, (), StoreError> {
        let table = table.to_string();
        let hub = self.hub.clone();

        Box::pin(async move {
            let range = a1_range(&table, 1, None, values.len());
            debug!("Appending to {}", range);

            let request = ValueRange {
                range: Some(range.clone()),
                major_dimension: Some("ROWS".to_string()),
                values: Some(vec![values]),
            };
            hub.spreadsheets()
                .values_append(request, &self.spreadsheet_id, &range)
                .value_input_option("USER_ENTERED")
                .insert_data_option("INSERT_ROWS")
                .doit()
                .await
                .map_err(|e| map_api_error(&table, e))?;
            Ok(())
        })
    }
}
