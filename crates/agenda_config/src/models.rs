// --- File: crates/agenda_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the agenda crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which tabular store backs the slot and booking tables.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Google Sheets v4 API, authenticated with a service account key.
    #[default]
    Google,
    /// Process-local tables, optionally seeded from a JSON file.
    Memory,
}

// --- Spreadsheet Config ---
// Identifiers of the backing spreadsheet and its two tables.
// The service account key itself is read from `key_path`, never stored here.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub spreadsheet_id: Option<String>, // Mandatory for the google backend
    pub key_path: Option<String>,       // Mandatory for the google backend
    #[serde(default = "default_slots_sheet")]
    pub slots_sheet: String,
    #[serde(default = "default_bookings_sheet")]
    pub bookings_sheet: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_free_status")]
    pub free_status: String,
    #[serde(default = "default_occupied_status")]
    pub occupied_status: String,
    /// JSON file with initial table contents for the memory backend.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            spreadsheet_id: None,
            key_path: None,
            slots_sheet: default_slots_sheet(),
            bookings_sheet: default_bookings_sheet(),
            time_zone: default_time_zone(),
            free_status: default_free_status(),
            occupied_status: default_occupied_status(),
            seed_file: None,
        }
    }
}

fn default_slots_sheet() -> String {
    "Horarios".to_string()
}

fn default_bookings_sheet() -> String {
    "Agendamentos".to_string()
}

fn default_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_free_status() -> String {
    "LIVRE".to_string()
}

fn default_occupied_status() -> String {
    "OCUPADO".to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
}
