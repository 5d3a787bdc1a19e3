//! Utility functions for common operations

use crate::lookup::error::LookupError;
use crate::lookup::types::Provider;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Build the HTTP client shared by both adapters
/// No timeout unless one is given
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// GET a URL and return the whole body
pub async fn http_get(
    client: &Client,
    provider: Provider,
    url: &str,
) -> Result<Vec<u8>, LookupError> {
    info!("[{}] GET {}", provider, url);

    let network = |source| LookupError::Network { provider, source };

    let response = client.get(url).send().await.map_err(network)?;
    let status = response.status();

    if !status.is_success() {
        return Err(LookupError::Status { provider, status });
    }

    let bytes = response.bytes().await.map_err(network)?;
    debug!("[{}] received {} bytes", provider, bytes.len());
    Ok(bytes.to_vec())
}

pub fn brasilapi_url(base_url: &str, cep: &str) -> String {
    format!("{}/api/cep/v1/{}", base_url.trim_end_matches('/'), cep)
}

pub fn viacep_url(base_url: &str, cep: &str) -> String {
    format!("{}/ws/{}/json/", base_url.trim_end_matches('/'), cep)
}
