use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::model::{Pokemon, PokemonListing};
use crate::remote::{RemoteClient, RemoteError};

/// HTTP client for the PokeAPI catalog.
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl PokeApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let request_timeout = Duration::from_secs(config.timeout_seconds as u64);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .timeout(request_timeout)
            .build()
            .map_err(RemoteError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, RemoteError> {
        tracing::debug!(url = %url, "Catalog request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout {
                    url: url.clone(),
                    duration: self.request_timeout.as_secs(),
                }
            } else {
                RemoteError::Connection {
                    url: url.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string();
            tracing::warn!(url = %url, status = status.as_u16(), "Catalog returned error status");
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout {
                    url: url.clone(),
                    duration: self.request_timeout.as_secs(),
                }
            } else {
                RemoteError::Decode {
                    url: url.clone(),
                    source: e,
                }
            }
        })
    }
}

#[async_trait]
impl RemoteClient for PokeApiClient {
    async fn list(&self, limit: u32, offset: u32) -> Result<PokemonListing, RemoteError> {
        let url = format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset);
        self.get_json(url).await
    }

    async fn fetch_detail(&self, id: u32) -> Result<Pokemon, RemoteError> {
        let url = format!("{}/pokemon/{}/", self.base_url, id);
        self.get_json(url).await
    }
}
