// --- File: crates/agenda_sheets/src/lib.rs ---
pub mod auth;
pub mod cells;
#[cfg(test)]
mod cells_test;
pub mod doc;
pub mod events;
pub mod factory;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod memory;
pub mod routes;
pub mod service;
