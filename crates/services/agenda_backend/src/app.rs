// File: services/agenda_backend/src/app.rs
use agenda_common::AgendaError;
use agenda_config::AppConfig;
use agenda_sheets::routes as sheets_routes;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the full application: slot routes under `/api`, docs when enabled, CORS and tracing.
pub async fn build_app(config: Arc<AppConfig>) -> Result<Router, AgendaError> {
    let sheets_router = sheets_routes::routes(config.clone()).await?;
    Ok(assemble(sheets_router))
}

/// Wraps an already built slot router with the shared routes and layers.
pub fn assemble(sheets_router: Router) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Agenda API" }))
        .merge(sheets_router);

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use agenda_sheets::doc::SheetsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Agenda API",
                version = "0.1.0",
                description = "Appointment slots kept in a spreadsheet",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SheetsApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // The booking page is served from another origin.
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
