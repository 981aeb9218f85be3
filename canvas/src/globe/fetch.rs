//! Land-boundary download.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use super::geo::FeatureCollection;

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid land data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a GeoJSON feature collection.
///
/// # Errors
///
/// Returns [`GeoError::Decode`] when the body is not a feature collection.
pub fn parse_land(body: &str) -> Result<FeatureCollection, GeoError> {
    Ok(serde_json::from_str(body)?)
}

/// Download and decode the land dataset at `url`.
///
/// # Errors
///
/// Fails on network errors, a non-2xx status, or a malformed body.
pub async fn fetch_land(url: &str) -> Result<FeatureCollection, GeoError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| GeoError::Request(e.to_string()))?;
    let status = resp.status();
    if !(200..300).contains(&status) {
        return Err(GeoError::Status(status));
    }
    let body = resp.text().await.map_err(|e| GeoError::Request(e.to_string()))?;
    parse_land(&body)
}
