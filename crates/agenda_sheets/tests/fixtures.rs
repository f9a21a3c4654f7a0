//! Test fixtures for the slot listing and booking tests
//!
//! Factory functions for stores, configs and routers shared by the
//! integration tests.
#![allow(dead_code)]

use agenda_common::Row;
use agenda_config::{AppConfig, SheetsConfig, StoreBackend};
use agenda_sheets::handlers::SheetsState;
use agenda_sheets::logic::{SheetSettings, BOOKING_LOG_HEADER};
use agenda_sheets::memory::InMemorySheetStore;
use agenda_sheets::routes::routes_with_state;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

/// Creates a slot row with the given date, time and status texts
pub fn slot(date: &str, time: &str, status: &str) -> Row {
    vec![json!(date), json!(time), json!(status)]
}

/// Creates a store holding the given slot rows plus an empty booking log
pub fn create_store(slots: Vec<Row>) -> Arc<InMemorySheetStore> {
    let mut rows = vec![slot("Data", "Hora", "Status")];
    rows.extend(slots);
    Arc::new(
        InMemorySheetStore::new()
            .with_table("Horarios", rows)
            .with_table(
                "Agendamentos",
                vec![BOOKING_LOG_HEADER.iter().map(|c| json!(c)).collect()],
            ),
    )
}

/// A week of morning slots, the second one already taken
pub fn create_week_store() -> Arc<InMemorySheetStore> {
    create_store(vec![
        slot("10/06/2024", "09:00", "LIVRE"),
        slot("10/06/2024", "10:00", "OCUPADO"),
        slot("11/06/2024", "09:00", "LIVRE"),
        slot("12/06/2024", "09:00", "livre"),
        slot("15/06/2024", "08:30", "LIVRE"),
    ])
}

/// Creates a mock AppConfig using the in-memory backend
pub fn create_mock_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        sheets: SheetsConfig {
            backend: StoreBackend::Memory,
            ..SheetsConfig::default()
        },
        ..AppConfig::default()
    })
}

/// Creates the slot router around `store`
pub fn create_router(store: Arc<InMemorySheetStore>) -> Router {
    let config = create_mock_config();
    let settings = SheetSettings::from_config(&config.sheets).expect("valid settings");
    let state = SheetsState::new(settings, store);
    routes_with_state(Arc::new(state))
}
