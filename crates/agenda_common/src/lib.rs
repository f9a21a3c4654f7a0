// --- File: crates/agenda_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Store abstraction

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, not_found, parse_error, validation_error, AgendaError,
    HttpStatusCode,
};

pub use http::{handle_json_result, IntoHttpResponse};

pub use services::{BoxFuture, Row, StoreError, TabularStore};
