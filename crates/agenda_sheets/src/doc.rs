// File: crates/agenda_sheets/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::ActionQuery;
use crate::logic::{BookSlotRequest, BookingResponse, SlotView};

#[utoipa::path(
    get,
    path = "/exec",
    params(ActionQuery),
    responses(
        (status = 200, description = "Free slots in sheet order", body = [SlotView],
         example = json!([
             { "rowIndex": 2, "data": "10/06/2024", "hora": "09:00", "diaSemana": "Segunda-feira" }
         ])
        ),
        (status = 400, description = "Unknown action",
         example = json!({ "error": "Ação inválida" })
        ),
        (status = 500, description = "Slots table missing",
         example = json!({ "error": "A aba \"Horarios\" não foi encontrada na planilha.", "erro": "configuracao" })
        )
    )
)]
fn doc_exec_get_handler() {}

#[utoipa::path(
    get,
    path = "/slots",
    responses(
        (status = 200, description = "Free slots in sheet order", body = [SlotView]),
        (status = 500, description = "Slots table missing")
    )
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    post,
    path = "/exec",
    request_body(content = BookSlotRequest, example = json!({
        "rowIndex": 2,
        "nome": "Ana",
        "telefone": "11 99999-0000",
        "dataNascimento": "01/01/1990",
        "observacoes": "Primeira consulta"
    })),
    responses(
        (status = 200, description = "Slot booked", body = BookingResponse,
         example = json!({
             "sucesso": true,
             "mensagem": "Agendamento realizado com sucesso!",
             "data": "10/06/2024",
             "hora": "09:00"
         })
        ),
        (status = 400, description = "Missing or invalid fields", body = BookingResponse,
         example = json!({
             "sucesso": false,
             "mensagem": "O campo \"nome\" é obrigatório.",
             "erro": "validacao"
         })
        ),
        (status = 404, description = "Row is not a slot", body = BookingResponse),
        (status = 409, description = "Slot already taken", body = BookingResponse,
         example = json!({
             "sucesso": false,
             "mensagem": "Horário já ocupado. Por favor, escolha outro horário.",
             "erro": "conflito"
         })
        ),
        (status = 502, description = "Spreadsheet unavailable", body = BookingResponse)
    )
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body = BookSlotRequest,
    responses(
        (status = 200, description = "Slot booked", body = BookingResponse),
        (status = 409, description = "Slot already taken", body = BookingResponse)
    )
)]
fn doc_book_alias_handler() {}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String, example = json!("ok")))
)]
fn doc_health_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_exec_get_handler,
        doc_get_slots_handler,
        doc_book_slot_handler,
        doc_book_alias_handler,
        doc_health_handler
    ),
    components(schemas(SlotView, BookSlotRequest, BookingResponse)),
    tags(
        (name = "agenda", description = "Appointment slots kept in a spreadsheet")
    ),
    servers(
        (url = "/api", description = "Agenda API server")
    )
)]
pub struct SheetsApiDoc;
