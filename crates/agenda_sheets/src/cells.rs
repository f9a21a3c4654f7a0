// --- File: crates/agenda_sheets/src/cells.rs ---
//! Reading date, time and status values out of spreadsheet cells.
//!
//! Cells arrive as JSON values. Dates and times are read as spreadsheet
//! serial numbers (days since 1899-12-30, fraction = time of day), as plain
//! text, or as RFC 3339 instants which are first moved into the sheet's zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde_json::Value;

/// Portuguese weekday names, indexed by days from Sunday.
pub const DIAS_SEMANA: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Day zero of spreadsheet serial dates.
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Returns the cell at a 1-based column, treating missing trailing cells as empty.
pub fn cell(row: &[Value], column: usize) -> &Value {
    column
        .checked_sub(1)
        .and_then(|index| row.get(index))
        .unwrap_or(&Value::Null)
}

/// Whether a cell holds nothing, the way a spreadsheet shows a blank cell.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Trimmed, uppercased text of a status cell. Blank cells give an empty string.
pub fn normalize_status(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_uppercase(),
        other => other.to_string().trim().to_uppercase(),
    }
}

/// Interprets a cell as a wall-clock moment in `tz`.
fn cell_date_time(value: &Value, tz: Tz) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => from_serial(n.as_f64()?),
        Value::String(s) => parse_text(s.trim(), tz),
        _ => None,
    }
}

fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let total_seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let date = serial_epoch().checked_add_signed(Duration::days(total_seconds.div_euclid(86_400)))?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        u32::try_from(total_seconds.rem_euclid(86_400)).ok()?,
        0,
    )?;
    Some(date.and_time(time))
}

fn parse_text(text: &str, tz: Tz) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&tz).naive_local());
    }
    if let Some(moment) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(moment);
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return date.and_hms_opt(0, 0, 0);
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .map(|time| serial_epoch().and_time(time))
}

/// Calendar date held by a cell, in the sheet's zone.
pub fn cell_date(value: &Value, tz: Tz) -> Option<NaiveDate> {
    cell_date_time(value, tz).map(|moment| moment.date())
}

/// Time of day held by a cell, in the sheet's zone.
pub fn cell_time(value: &Value, tz: Tz) -> Option<NaiveTime> {
    cell_date_time(value, tz).map(|moment| moment.time())
}

/// `dd/MM/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `HH:mm`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Portuguese weekday name of a date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    DIAS_SEMANA[date.weekday().num_days_from_sunday() as usize]
}
