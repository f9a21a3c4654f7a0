// File: crates/agenda_sheets/src/auth.rs
use agenda_config::SheetsConfig;
use google_sheets4::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    Sheets,
};
use std::{error::Error, path::Path};
use tracing::debug;

type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = Sheets<Connector>;

/// Builds an authenticated Sheets client from the service account key at `sheets.key_path`.
///
/// The spreadsheet must be shared (as editor) with the service account's email address.
pub async fn create_sheets_hub(
    config: &SheetsConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .filter(|path| !path.trim().is_empty())
        .ok_or("sheets.key_path is not set")?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| format!("cannot read service account key {}: {}", key_path, e))?;
    debug!("Loaded service account key for {}", sa_key.client_email);

    let authenticator = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let connector = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

    Ok(Sheets::new(client, authenticator))
}
