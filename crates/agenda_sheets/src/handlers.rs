// File: crates/agenda_sheets/src/handlers.rs
use agenda_common::{
    handle_json_result, parse_error, AgendaError, HttpStatusCode, TabularStore,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::events::SlotEvents;
use crate::logic::{
    book_slot, list_available_slots, BookSlotRequest, BookingResponse, SheetSettings, SlotView,
};

pub const INVALID_ACTION_MESSAGE: &str = "Ação inválida";
pub const GET_SLOTS_ACTION: &str = "getSlots";

// Define shared state needed by the slot handlers
#[derive(Clone)]
pub struct SheetsState {
    pub settings: SheetSettings,
    pub store: Arc<dyn TabularStore>,
    pub events: Arc<dyn SlotEvents>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ActionQuery {
    /// Only `getSlots` is recognised.
    pub action: Option<String>,
}

/// `GET /exec?action=getSlots`: the action-dispatching entry point used by the booking page.
///
/// The query is parsed here rather than by the `Query` extractor so that a
/// malformed query string still gets the JSON "invalid action" answer.
#[axum::debug_handler]
pub async fn exec_get_handler(
    State(state): State<Arc<SheetsState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let action = serde_urlencoded::from_str::<ActionQuery>(query.as_deref().unwrap_or(""))
        .ok()
        .and_then(|query| query.action);

    match action.as_deref() {
        Some(GET_SLOTS_ACTION) => get_slots_handler(State(state)).await.into_response(),
        _ => invalid_action(),
    }
}

fn invalid_action() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": INVALID_ACTION_MESSAGE })),
    )
        .into_response()
}

/// Handler to list the free slots.
#[axum::debug_handler]
pub async fn get_slots_handler(
    State(state): State<Arc<SheetsState>>,
) -> Result<Json<Vec<SlotView>>, Response> {
    let span = info_span!("get_slots", request_id = %Uuid::new_v4());
    let result =
        list_available_slots(state.store.as_ref(), &state.settings, state.events.as_ref())
            .instrument(span)
            .await;
    handle_json_result(result)
}

/// Handler to book a slot.
///
/// The body is read as JSON whatever its content type, since browser clients
/// often post `text/plain` to avoid a CORS preflight. An empty body falls back
/// to the URL query parameters. Every outcome is a [`BookingResponse`].
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<SheetsState>>,
    RawQuery(query): RawQuery,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<BookingResponse>) {
    let span = info_span!("book_slot", request_id = %Uuid::new_v4());

    async move {
        let parsed = body
            .map_err(|rejection| {
                parse_error(format!("Corpo da requisição inválido: {}", rejection.body_text()))
            })
            .and_then(|body| parse_booking_request(query.as_deref(), &body));
        let request = match parsed {
            Ok(request) => request,
            Err(err) => {
                state.events.booking_rejected(None, &err);
                return failure(&err);
            }
        };

        match book_slot(
            state.store.as_ref(),
            &state.settings,
            state.events.as_ref(),
            request,
            Utc::now(),
        )
        .await
        {
            Ok(confirmation) => (
                StatusCode::OK,
                Json(BookingResponse::confirmed(&confirmation)),
            ),
            Err(err) => failure(&err),
        }
    }
    .instrument(span)
    .await
}

/// Liveness check.
pub async fn health_handler() -> &'static str {
    "ok"
}

/// Parses the booking request from the body, or from the query string when the body is empty.
pub fn parse_booking_request(
    query: Option<&str>,
    body: &[u8],
) -> Result<BookSlotRequest, AgendaError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_urlencoded::from_str(query.unwrap_or(""))
            .map_err(|e| parse_error(format!("Parâmetros da requisição inválidos: {}", e)));
    }
    Ok(serde_json::from_slice(body)?)
}

fn failure(err: &AgendaError) -> (StatusCode, Json<BookingResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(BookingResponse::failed(err)))
}
