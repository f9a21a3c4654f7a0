// --- File: crates/agenda_sheets/src/factory.rs ---
//! Builds the configured store and the shared handler state.

use agenda_common::{config_error, AgendaError, TabularStore};
use agenda_config::{AppConfig, SheetsConfig, StoreBackend};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::auth::create_sheets_hub;
use crate::events::{SlotEvents, TracingSlotEvents};
use crate::handlers::SheetsState;
use crate::logic::{SheetSettings, BOOKING_LOG_HEADER};
use crate::memory::InMemorySheetStore;
use crate::service::GoogleSheetsStore;

/// Creates the tabular store selected by `sheets.backend`.
///
/// # Errors
///
/// Returns a `ConfigError` if the google backend lacks a spreadsheet id or
/// its key cannot be loaded, or if the memory seed file is unreadable.
pub async fn create_store(config: &SheetsConfig) -> Result<Arc<dyn TabularStore>, AgendaError> {
    match config.backend {
        StoreBackend::Google => {
            let spreadsheet_id = config
                .spreadsheet_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| config_error("sheets.spreadsheet_id é obrigatório."))?;

            info!("Initializing Google Sheets store for spreadsheet {}", spreadsheet_id);
            let hub = create_sheets_hub(config).await.map_err(|e| {
                config_error(format!("Falha ao autenticar no Google Sheets: {}", e))
            })?;
            Ok(Arc::new(GoogleSheetsStore::new(Arc::new(hub), spreadsheet_id)))
        }
        StoreBackend::Memory => {
            let store = match config.seed_file.as_deref() {
                Some(path) => {
                    info!("Initializing in-memory store from {}", path);
                    InMemorySheetStore::from_seed_file(path)?
                }
                None => {
                    info!("Initializing empty in-memory store");
                    empty_tables(config)
                }
            };
            Ok(Arc::new(store))
        }
    }
}

fn header(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|c| Value::from(*c)).collect()
}

// Both tables with just their header rows.
fn empty_tables(config: &SheetsConfig) -> InMemorySheetStore {
    InMemorySheetStore::new()
        .with_table(&config.slots_sheet, vec![header(&["Data", "Hora", "Status"])])
        .with_table(&config.bookings_sheet, vec![header(&BOOKING_LOG_HEADER[..])])
}

impl SheetsState {
    /// Builds the handler state from configuration, creating the configured store.
    pub async fn from_config(config: Arc<AppConfig>) -> Result<Self, AgendaError> {
        let settings = SheetSettings::from_config(&config.sheets)?;
        let store = create_store(&config.sheets).await?;
        Ok(Self::new(settings, store))
    }

    pub fn new(settings: SheetSettings, store: Arc<dyn TabularStore>) -> Self {
        Self {
            settings,
            store,
            events: Arc::new(TracingSlotEvents),
        }
    }

    /// Replaces the default tracing observer.
    pub fn with_events(mut self, events: Arc<dyn SlotEvents>) -> Self {
        self.events = events;
        self
    }
}
