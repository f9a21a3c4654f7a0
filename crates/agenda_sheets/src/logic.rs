// --- File: crates/agenda_sheets/src/logic.rs ---
use agenda_common::{
    config_error, conflict, not_found, validation_error, AgendaError, Row, StoreError,
    TabularStore,
};
use agenda_config::SheetsConfig;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::cells::{
    cell, cell_date, cell_time, format_date, format_time, normalize_status, weekday_name,
};
use crate::events::SlotEvents;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Columns of the slots table: A = date, B = time, C = status.
pub const DATE_COLUMN: usize = 1;
pub const TIME_COLUMN: usize = 2;
pub const STATUS_COLUMN: usize = 3;
pub const SLOT_COLUMNS: usize = 3;

/// Row 1 of every table is the header.
pub const FIRST_DATA_ROW: usize = 2;

/// Header row of the booking log, in the order records are appended.
pub const BOOKING_LOG_HEADER: [&str; 7] = [
    "Timestamp",
    "Data",
    "Hora",
    "Nome",
    "DataNascimento",
    "Observacoes",
    "Telefone",
];

pub const SLOT_TAKEN_MESSAGE: &str = "Horário já ocupado. Por favor, escolha outro horário.";
pub const BOOKING_CONFIRMED_MESSAGE: &str = "Agendamento realizado com sucesso!";

/// Table names, sentinels and timezone resolved once from [`SheetsConfig`].
#[derive(Debug, Clone)]
pub struct SheetSettings {
    pub slots_sheet: String,
    pub bookings_sheet: String,
    pub time_zone: Tz,
    /// Normalized (trimmed, uppercase) free sentinel used for comparisons.
    pub free_status: String,
    /// Occupied sentinel exactly as written into the status cell.
    pub occupied_status: String,
}

impl SheetSettings {
    pub fn from_config(config: &SheetsConfig) -> Result<Self, AgendaError> {
        let time_zone = Tz::from_str(config.time_zone.trim()).map_err(|_| {
            config_error(format!("Fuso horário inválido: {}", config.time_zone))
        })?;

        let free_status = config.free_status.trim().to_uppercase();
        let occupied_status = config.occupied_status.trim().to_string();
        if free_status.is_empty() || occupied_status.is_empty() {
            return Err(config_error("Os status de horário livre e ocupado não podem ser vazios."));
        }
        if free_status == occupied_status.to_uppercase() {
            return Err(config_error("Os status de horário livre e ocupado devem ser diferentes."));
        }

        Ok(Self {
            slots_sheet: config.slots_sheet.clone(),
            bookings_sheet: config.bookings_sheet.clone(),
            time_zone,
            free_status,
            occupied_status,
        })
    }
}

// --- Data Structures ---

/// A free slot as returned by the listing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    /// Physical row of the slot in the slots table.
    #[cfg_attr(feature = "openapi", schema(example = 2))]
    pub row_index: usize,
    #[cfg_attr(feature = "openapi", schema(example = "10/06/2024"))]
    pub data: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub hora: String,
    #[cfg_attr(feature = "openapi", schema(example = "Segunda-feira"))]
    pub dia_semana: String,
}

/// Booking request as sent by the form, either as a JSON body or as query parameters.
///
/// Every field is optional at the parsing stage; [`BookSlotRequest::validate`]
/// enforces the required ones so callers get a validation message instead of
/// a parse failure.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    /// Row of the chosen slot, as a number or numeric string.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<u64>, example = 2))]
    pub row_index: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[cfg_attr(feature = "openapi", schema(example = "Ana"))]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub telefone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub data_nascimento: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub observacoes: Option<String>,
}

/// A booking request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub row: usize,
    pub nome: String,
    pub telefone: Option<String>,
    pub data_nascimento: Option<String>,
    pub observacoes: Option<String>,
}

impl BookSlotRequest {
    pub fn validate(self) -> Result<ValidBooking, AgendaError> {
        let row = match self.row_index {
            None | Some(Value::Null) => {
                return Err(validation_error("O campo \"rowIndex\" é obrigatório."))
            }
            Some(value) => parse_row_index(&value).ok_or_else(|| {
                validation_error("O campo \"rowIndex\" deve ser um número inteiro não negativo.")
            })?,
        };

        let nome = non_blank(self.nome)
            .ok_or_else(|| validation_error("O campo \"nome\" é obrigatório."))?;

        Ok(ValidBooking {
            row,
            nome,
            telefone: non_blank(self.telefone),
            data_nascimento: non_blank(self.data_nascimento),
            observacoes: non_blank(self.observacoes),
        })
    }
}

fn parse_row_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(row) => usize::try_from(row).ok(),
            None => n.as_f64().and_then(integral_row),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<usize>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_row))
        }
        _ => None,
    }
}

// Integral floats such as 2.0 come from loosely typed clients.
fn integral_row(f: f64) -> Option<usize> {
    (f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64).then_some(f as usize)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// Accepts strings, numbers and booleans for free-text fields.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// One record of the booking log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub timestamp: DateTime<Utc>,
    pub data: String,
    pub hora: String,
    pub nome: String,
    pub data_nascimento: Option<String>,
    pub observacoes: Option<String>,
    pub telefone: Option<String>,
}

impl Booking {
    /// Cells in [`BOOKING_LOG_HEADER`] order. Absent fields are written as empty strings.
    pub fn to_row(&self, tz: Tz) -> Row {
        let timestamp = self
            .timestamp
            .with_timezone(&tz)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string();
        vec![
            Value::String(timestamp),
            Value::String(self.data.clone()),
            Value::String(self.hora.clone()),
            user_cell(&self.nome),
            user_cell(self.data_nascimento.as_deref().unwrap_or_default()),
            user_cell(self.observacoes.as_deref().unwrap_or_default()),
            user_cell(self.telefone.as_deref().unwrap_or_default()),
        ]
    }
}

/// Client-supplied text for a log cell. The log is appended as user-entered
/// input, so text that the sheet would read as a formula gets a leading `'`.
pub fn user_cell(text: &str) -> Value {
    match text.chars().next() {
        Some('=' | '+' | '-' | '@') => Value::String(format!("'{}", text)),
        _ => Value::String(text.to_string()),
    }
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub row: usize,
    pub booking: Booking,
}

/// Response body of the booking endpoint, for both outcomes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub sucesso: bool,
    #[cfg_attr(feature = "openapi", schema(example = "Agendamento realizado com sucesso!"))]
    pub mensagem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "10/06/2024"))]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub hora: Option<String>,
    /// Machine readable error code, present on failures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro: Option<String>,
}

impl BookingResponse {
    pub fn confirmed(confirmation: &BookingConfirmation) -> Self {
        Self {
            sucesso: true,
            mensagem: BOOKING_CONFIRMED_MESSAGE.to_string(),
            data: Some(confirmation.booking.data.clone()),
            hora: Some(confirmation.booking.hora.clone()),
            erro: None,
        }
    }

    pub fn failed(err: &AgendaError) -> Self {
        Self {
            sucesso: false,
            mensagem: err.to_string(),
            data: None,
            hora: None,
            erro: Some(err.code().to_string()),
        }
    }
}

// --- Slot Reader ---

fn slot_moment(row: &[Value], tz: Tz) -> Option<(NaiveDate, NaiveTime)> {
    let date = cell_date(cell(row, DATE_COLUMN), tz)?;
    let time = cell_time(cell(row, TIME_COLUMN), tz)?;
    Some((date, time))
}

/// Lists the free slots of the slots table in physical row order.
///
/// A missing slots table is a configuration error; a table holding only its
/// header yields an empty list.
pub async fn list_available_slots(
    store: &dyn TabularStore,
    settings: &SheetSettings,
    events: &dyn SlotEvents,
) -> Result<Vec<SlotView>, AgendaError> {
    let rows = store
        .read_rows(&settings.slots_sheet, FIRST_DATA_ROW, SLOT_COLUMNS)
        .await?;

    let mut slots = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if normalize_status(cell(row, STATUS_COLUMN)) != settings.free_status {
            continue;
        }
        let row_index = index + FIRST_DATA_ROW;
        match slot_moment(row, settings.time_zone) {
            Some((date, time)) => slots.push(SlotView {
                row_index,
                data: format_date(date),
                hora: format_time(time),
                dia_semana: weekday_name(date).to_string(),
            }),
            None => events.unreadable_row(&settings.slots_sheet, row_index),
        }
    }

    events.slots_listed(slots.len(), rows.len());
    Ok(slots)
}

// --- Booking Writer ---

/// Books a slot: re-checks its status, marks it occupied and appends the booking log record.
///
/// The status check and the status write are two separate store calls. Two
/// requests that both read the slot as free before either writes will both
/// succeed; nothing here serializes them.
pub async fn book_slot(
    store: &dyn TabularStore,
    settings: &SheetSettings,
    events: &dyn SlotEvents,
    request: BookSlotRequest,
    now: DateTime<Utc>,
) -> Result<BookingConfirmation, AgendaError> {
    let booking = match request.validate() {
        Ok(booking) => booking,
        Err(err) => {
            events.booking_rejected(None, &err);
            return Err(err);
        }
    };

    let row = booking.row;
    match write_booking(store, settings, booking, now).await {
        Ok(confirmation) => {
            events.slot_booked(confirmation.row, &confirmation.booking);
            Ok(confirmation)
        }
        Err(err) => {
            events.booking_rejected(Some(row), &err);
            Err(err)
        }
    }
}

async fn write_booking(
    store: &dyn TabularStore,
    settings: &SheetSettings,
    booking: ValidBooking,
    now: DateTime<Utc>,
) -> Result<BookingConfirmation, AgendaError> {
    let row_number = booking.row;
    if row_number < FIRST_DATA_ROW {
        return Err(not_found(format!(
            "A linha {} não corresponde a um horário.",
            row_number
        )));
    }

    let row = store
        .read_row(&settings.slots_sheet, row_number, SLOT_COLUMNS)
        .await?
        .ok_or_else(|| StoreError::RowOutOfRange {
            table: settings.slots_sheet.clone(),
            row: row_number,
        })?;

    if normalize_status(cell(&row, STATUS_COLUMN)) != settings.free_status {
        return Err(conflict(SLOT_TAKEN_MESSAGE));
    }

    let (date, time) = slot_moment(&row, settings.time_zone).ok_or_else(|| {
        StoreError::InvalidCell {
            table: settings.slots_sheet.clone(),
            cell: format!("A{}:B{}", row_number, row_number),
            reason: "data ou hora ilegível".to_string(),
        }
    })?;

    // Refuse before touching the slot, so it never ends up occupied without a log record.
    if !store.has_table(&settings.bookings_sheet).await? {
        return Err(StoreError::TableNotFound(settings.bookings_sheet.clone()).into());
    }

    store
        .write_cell(
            &settings.slots_sheet,
            row_number,
            STATUS_COLUMN,
            Value::String(settings.occupied_status.clone()),
        )
        .await?;

    let record = Booking {
        timestamp: now,
        data: format_date(date),
        hora: format_time(time),
        nome: booking.nome,
        data_nascimento: booking.data_nascimento,
        observacoes: booking.observacoes,
        telefone: booking.telefone,
    };
    store
        .append_row(&settings.bookings_sheet, record.to_row(settings.time_zone))
        .await?;

    Ok(BookingConfirmation {
        row: row_number,
        booking: record,
    })
}
