use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
mod fixtures;

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get_slots() -> Request<Body> {
    Request::builder()
        .uri("/exec?action=getSlots")
        .body(Body::empty())
        .unwrap()
}

fn book(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/exec")
        .header("content-type", "text/plain;charset=utf-8")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_slots_endpoint() {
    let router = fixtures::create_router(fixtures::create_week_store());
    let (status, body) = call(&router, get_slots()).await;

    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().unwrap();
    let rows: Vec<u64> = slots
        .iter()
        .map(|slot| slot["rowIndex"].as_u64().unwrap())
        .collect();
    assert_eq!(rows, vec![2, 4, 5, 6]);

    let weekdays: Vec<&str> = slots
        .iter()
        .map(|slot| slot["diaSemana"].as_str().unwrap())
        .collect();
    assert_eq!(
        weekdays,
        vec!["Segunda-feira", "Terça-feira", "Quarta-feira", "Sábado"]
    );
}

#[tokio::test]
async fn test_book_slot_endpoint() {
    let router = fixtures::create_router(fixtures::create_week_store());
    let (status, body) = call(
        &router,
        book(json!({
            "rowIndex": 5,
            "nome": "Ana",
            "telefone": "11 99999-0000",
            "dataNascimento": "01/01/1990",
            "observacoes": "Primeira consulta"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "sucesso": true,
            "mensagem": "Agendamento realizado com sucesso!",
            "data": "12/06/2024",
            "hora": "09:00"
        })
    );
}

#[tokio::test]
async fn test_book_slot_endpoint_conflict() {
    let router = fixtures::create_router(fixtures::create_week_store());
    let (status, body) = call(&router, book(json!({ "rowIndex": 3, "nome": "Ana" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["sucesso"], json!(false));
    assert_eq!(
        body["mensagem"],
        json!("Horário já ocupado. Por favor, escolha outro horário.")
    );
}

#[tokio::test]
async fn test_missing_slots_table_endpoint() {
    let store = std::sync::Arc::new(agenda_sheets::memory::InMemorySheetStore::new());
    let router = fixtures::create_router(store);
    let (status, body) = call(&router, get_slots()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["erro"], json!("configuracao"));
    assert!(body["error"].as_str().unwrap().contains("Horarios"));
}
