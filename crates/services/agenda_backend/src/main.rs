// File: services/agenda_backend/src/main.rs
use agenda_common::logging;
use agenda_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod app;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = logging::init_from_config(&config.logging);

    let app = match app::build_app(config.clone()).await {
        Ok(app) => app,
        Err(e) => {
            logging::log_error(&e, "Failed to build the application");
            return ExitCode::FAILURE;
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            logging::log_error(&e, &format!("Failed to bind {}", addr));
            return ExitCode::FAILURE;
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        logging::log_error(&e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
