// --- File: crates/agenda_sheets/src/routes.rs ---

use crate::handlers::{
    book_slot_handler, exec_get_handler, get_slots_handler, health_handler, SheetsState,
};
use agenda_common::AgendaError;
use agenda_config::AppConfig;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all slot routes, building the store from `config`.
pub async fn routes(config: Arc<AppConfig>) -> Result<Router, AgendaError> {
    let state = SheetsState::from_config(config).await?;
    Ok(routes_with_state(Arc::new(state)))
}

/// Creates the slot router around an existing state (used with injected stores).
pub fn routes_with_state(state: Arc<SheetsState>) -> Router {
    Router::new()
        .route("/exec", get(exec_get_handler).post(book_slot_handler))
        .route("/slots", get(get_slots_handler))
        .route("/book", post(book_slot_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
