// --- File: crates/agenda_sheets/src/events.rs ---
//! Observability hooks for the slot reader and booking writer.
//!
//! The logic reports what happened through [`SlotEvents`] at a fixed set of
//! points instead of logging inline, so tests can assert on the reports and
//! deployments can swap the sink.

use agenda_common::AgendaError;
use tracing::{error, info, warn};

use crate::logic::Booking;

#[cfg_attr(test, mockall::automock)]
pub trait SlotEvents: Send + Sync {
    /// A listing pass finished. `scanned` counts every data row read.
    fn slots_listed(&self, available: usize, scanned: usize);

    /// A free row was skipped because its date or time cell is unreadable.
    fn unreadable_row(&self, table: &str, row: usize);

    /// A slot was flipped to occupied and its booking appended to the log.
    fn slot_booked(&self, row: usize, booking: &Booking);

    /// A booking attempt failed. `row` is absent when validation failed before it was known.
    fn booking_rejected(&self, row: Option<usize>, error: &AgendaError);
}

/// Emits every event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSlotEvents;

impl SlotEvents for TracingSlotEvents {
    fn slots_listed(&self, available: usize, scanned: usize) {
        info!(available, scanned, "Listed available slots");
    }

    fn unreadable_row(&self, table: &str, row: usize) {
        warn!(table, row, "Skipping free slot with unreadable date or time");
    }

    fn slot_booked(&self, row: usize, booking: &Booking) {
        info!(
            row,
            date = %booking.data,
            time = %booking.hora,
            "Slot booked"
        );
    }

    fn booking_rejected(&self, row: Option<usize>, err: &AgendaError) {
        match err {
            AgendaError::ValidationError(_)
            | AgendaError::ParseError(_)
            | AgendaError::ConflictError(_)
            | AgendaError::NotFoundError(_) => {
                warn!(?row, code = err.code(), "Booking rejected: {}", err)
            }
            _ => error!(?row, code = err.code(), "Booking failed: {}", err),
        }
    }
}
