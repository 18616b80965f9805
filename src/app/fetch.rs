use serde::de::DeserializeOwned;
use tracing::warn;

use crate::app::ports::HttpClientPort;
use crate::error::{EcoletaError, Result};

/// GETs `url` and decodes a JSON body, mapping every failure to `FetchFailed`
pub async fn fetch_json<T: DeserializeOwned>(
    http: &dyn HttpClientPort,
    resource: &str,
    url: &str,
    query: &[(String, String)],
) -> Result<T> {
    let response = http.get(url, query).await.map_err(|reason| {
        warn!(%resource, %url, %reason, "request failed");
        EcoletaError::fetch_failed(resource, reason)
    })?;

    if !response.is_success() {
        warn!(%resource, %url, status = response.status, "unexpected status");
        return Err(EcoletaError::fetch_failed(
            resource,
            format!("HTTP status {}", response.status),
        ));
    }

    if !response.is_json() {
        warn!(%resource, %url, content_type = %response.content_type, "non-JSON body");
        return Err(EcoletaError::fetch_failed(
            resource,
            format!("unexpected content type {}", response.content_type),
        ));
    }

    serde_json::from_slice(&response.bytes).map_err(|e| {
        warn!(%resource, %url, error = %e, "undecodable body");
        EcoletaError::fetch_failed(resource, format!("invalid JSON: {}", e))
    })
}
