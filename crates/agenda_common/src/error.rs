use std::fmt;
use thiserror::Error;

use crate::services::StoreError;

/// The base error type for all Agenda errors.
///
/// The display text is the human readable message sent back to API callers,
/// so it is written for the person filling the booking form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// A backing table is missing or the service is misconfigured
    #[error("{0}")]
    ConfigError(String),

    /// Required booking fields are absent or malformed
    #[error("{0}")]
    ValidationError(String),

    /// The slot stopped being free between listing and booking
    #[error("{0}")]
    ConflictError(String),

    /// The request body could not be parsed
    #[error("{0}")]
    ParseError(String),

    /// The addressed row does not exist in the slots table
    #[error("{0}")]
    NotFoundError(String),

    /// The backing store failed or returned unusable data
    #[error("{0}")]
    StoreError(String),

    #[error("{0}")]
    InternalError(String),
}

impl AgendaError {
    /// Stable machine readable code, sent as the `erro` field of failure payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AgendaError::ConfigError(_) => "configuracao",
            AgendaError::ValidationError(_) => "validacao",
            AgendaError::ConflictError(_) => "conflito",
            AgendaError::ParseError(_) => "requisicao_invalida",
            AgendaError::NotFoundError(_) => "nao_encontrado",
            AgendaError::StoreError(_) => "armazenamento",
            AgendaError::InternalError(_) => "interno",
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::ConfigError(_) => 500,
            AgendaError::ValidationError(_) => 400,
            AgendaError::ConflictError(_) => 409,
            AgendaError::ParseError(_) => 400,
            AgendaError::NotFoundError(_) => 404,
            AgendaError::StoreError(_) => 502,
            AgendaError::InternalError(_) => 500,
        }
    }
}

impl From<StoreError> for AgendaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TableNotFound(table) => AgendaError::ConfigError(format!(
                "A aba \"{}\" não foi encontrada na planilha.",
                table
            )),
            StoreError::RowOutOfRange { table, row } => AgendaError::NotFoundError(format!(
                "A linha {} não existe na aba \"{}\".",
                row, table
            )),
            other => AgendaError::StoreError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AgendaError {
    fn from(err: serde_json::Error) -> Self {
        AgendaError::ParseError(format!("Corpo da requisição inválido: {}", err))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ConflictError(message.to_string())
}

pub fn parse_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ParseError(message.to_string())
}
