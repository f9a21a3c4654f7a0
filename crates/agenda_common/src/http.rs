// --- File: crates/agenda_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AgendaError, HttpStatusCode};

/// Extension trait for AgendaError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for AgendaError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": self.to_string(),
            "erro": self.code(),
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for AgendaError to make it easier to use in Axum handlers.
impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a Result<T, AgendaError> to a Result<Json<T>, Response>.
pub fn handle_json_result<T>(result: Result<T, AgendaError>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}
