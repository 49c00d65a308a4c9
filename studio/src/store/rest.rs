//! REST implementation of the simulation store.
//!
//! Talks to the platform API:
//! - `GET /simulations/{id}` - fetch one record
//! - `PATCH /simulations/{id}/fields` - partial update
//! - `POST /simulations/{id}/publish` - publish
//!
//! Every endpoint answers with the `{ data, error }` envelope; a missing
//! record is `data: null` (or HTTP 404), and a populated `error` field is
//! a rejection even under a 200 status.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use blueprint::Simulation;

use super::traits::{SimulationPatch, SimulationStore, StoreError};
use crate::config::StudioConfig;

/// REST client for the platform API.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestStore {
    /// Create a store from config.
    pub fn new(config: &StudioConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    fn simulation_url(&self, id: &str) -> String {
        format!("{}/simulations/{}", self.base_url, id)
    }

    fn auth_header(&self) -> Option<String> {
        self.api_token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

/// Platform API response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_connect() || err.is_timeout() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Network(err.to_string())
    }
}

/// Turn a non-success response into the matching error, preferring the
/// envelope's error message over the raw body.
async fn error_from_status(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or(body);

    if status.is_server_error() {
        StoreError::Unavailable(format!("HTTP {}: {}", status, message))
    } else {
        StoreError::Rejected(format!("HTTP {}: {}", status, message))
    }
}

/// Mutation acknowledgements may be an envelope or an empty body; only an
/// explicit error field fails the call.
async fn ack(response: reqwest::Response) -> Result<(), StoreError> {
    if !response.status().is_success() {
        return Err(error_from_status(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Network(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
        Ok(Envelope {
            error: Some(message),
            ..
        }) => Err(StoreError::Rejected(message)),
        Ok(_) => Ok(()),
        Err(e) => Err(StoreError::InvalidResponse(e.to_string())),
    }
}

#[async_trait]
impl SimulationStore for RestStore {
    async fn fetch(&self, id: &str) -> Result<Option<Simulation>, StoreError> {
        let mut request = self.client.get(self.simulation_url(id));
        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let envelope: Envelope<Simulation> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if let Some(message) = envelope.error {
            return Err(StoreError::Rejected(message));
        }
        Ok(envelope.data)
    }

    async fn update_fields(
        &self,
        id: &str,
        patch: &SimulationPatch,
    ) -> Result<(), StoreError> {
        let url = format!("{}/fields", self.simulation_url(id));
        let mut request = self.client.patch(&url);
        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request
            .json(patch)
            .send()
            .await
            .map_err(map_transport_error)?;
        ack(response).await
    }

    async fn publish(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/publish", self.simulation_url(id));
        let mut request = self.client.post(&url);
        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        ack(response).await
    }
}
