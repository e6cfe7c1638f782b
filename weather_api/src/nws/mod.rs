//! Client for the National Weather Service API (<https://www.weather.gov/documentation/services-web-api>).
//!
//! - `/points/{lat},{lon}` resolves a coordinate; `.properties.observationStations` is a URL
//!   listing the observation stations nearest the point.
//! - `/stations/{id}/observations/latest` returns the station's most recent reading.
//! - `/alerts/active?point={lat},{lon}` returns the active alerts covering the point.

pub mod models;

use crate::coordinate::Coordinate;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::NwsConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

const GEO_JSON: &str = "application/geo+json";

#[derive(Debug, Error)]
pub enum NwsError {
    #[error("NWS HTTP {} for {url}", .status.as_u16())]
    Status {
        status: StatusCode,
        url: String,
        /// Error document returned by the NWS, or its raw text if it was not JSON.
        body: Value,
    },
    #[error("network error contacting NWS at {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected document from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct NwsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NwsClient {
    /// Builds the shared HTTP client. The NWS rejects requests without an identifying `User-Agent`.
    pub fn new(config: &NwsConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn point_url(&self, coordinate: Coordinate) -> String {
        format!("{}/points/{coordinate}", self.base_url)
    }

    pub fn latest_observation_url(&self, station_id: &str) -> String {
        format!("{}/stations/{station_id}/observations/latest", self.base_url)
    }

    pub fn active_alerts_url(&self, coordinate: Coordinate) -> String {
        format!("{}/alerts/active?point={coordinate}", self.base_url)
    }

    /// GETs `url` and returns the JSON document. A successful response that is not JSON is
    /// wrapped as `{"raw_text": ...}`; a non-success status becomes [`NwsError::Status`].
    #[instrument(skip(self))]
    pub async fn get_json(&self, url: &str) -> Result<Value, NwsError> {
        let network = |source| NwsError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self.http.get(url).send().await.map_err(network)?;
        let status = resp.status();
        let text = resp.text().await.map_err(network)?;
        debug!(name: "nws.response.received", status = status.as_u16(), bytes = text.len(), "received NWS response");

        let parsed = serde_json::from_str::<Value>(&text);
        if !status.is_success() {
            let body = parsed.unwrap_or(Value::String(text));
            return Err(NwsError::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        Ok(parsed.unwrap_or_else(|_| json!({ "raw_text": text })))
    }

    /// GETs `url` and decodes it into `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, NwsError> {
        let value = self.get_json(url).await?;
        decode(url, value)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Result<T, NwsError> {
    serde_json::from_value(value).map_err(|source| NwsError::Decode {
        url: url.to_string(),
        source,
    })
}
