//! Async geocoder HTTP client
//!
//! Issues `GET <endpoint>?limit=..&lat=..&lon=..&q=..` with reqwest and races the
//! request against a CancellationToken so a superseded search stops immediately.

use reqwest::{Client, Url};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::types::{FeatureCollection, Place};
use crate::config::GeocoderConfig;

/// Errors that can occur during a geocoder search
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeocodeError {
    /// The configured endpoint is not a valid URL
    #[error("Invalid geocoder endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Geocoder answered with a non-success status
    #[error("Geocoder error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request was superseded
    #[error("Request cancelled")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    endpoint: String,
    limit: u32,
    bias_latitude: f64,
    bias_longitude: f64,
}

impl GeocodeClient {
    pub fn from_config(config: &GeocoderConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Use a preconfigured reqwest client (proxy or timeout settings)
    pub fn with_http_client(config: &GeocoderConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
            bias_latitude: config.bias_latitude,
            bias_longitude: config.bias_longitude,
        }
    }

    /// Build the search URL for `query`
    ///
    /// Parameters keep the order `limit`, `lat`, `lon`, `q`; the query text is
    /// percent-encoded by the URL serializer.
    pub fn search_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let limit = self.limit.to_string();
        let lat = self.bias_latitude.to_string();
        let lon = self.bias_longitude.to_string();

        Url::parse_with_params(
            &self.endpoint,
            &[
                ("limit", limit.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("q", query),
            ],
        )
        .map_err(|e| GeocodeError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        })
    }

    /// Search for `query`, aborting as soon as `cancel_token` fires
    ///
    /// # Returns
    /// * `Ok(places)` - Suggestions in response order (empty when the body has no features)
    /// * `Err(GeocodeError::Cancelled)` - The token was cancelled before completion
    /// * `Err(GeocodeError::*)` - Other errors
    pub async fn search_with_cancel(
        &self,
        query: &str,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<Place>, GeocodeError> {
        if cancel_token.is_cancelled() {
            return Err(GeocodeError::Cancelled);
        }

        let url = self.search_url(query)?;

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                log::debug!("Geocoder search for {:?} cancelled", query);
                Err(GeocodeError::Cancelled)
            }

            result = self.fetch(url) => result,
        }
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Place>, GeocodeError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeocodeError::Api { code, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

        Ok(collection.into_places())
    }
}
