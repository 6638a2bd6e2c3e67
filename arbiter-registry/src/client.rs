use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RegistryError;

/// Read-only view of the registry service for one partition.
///
/// The registry returns keyed maps, not ordered lists; ordering is imposed
/// later by the directory.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// `uid -> network address` map for the partition.
    async fn addresses(&self, partition: u16) -> Result<HashMap<u64, String>, RegistryError>;

    /// `uid -> registered key` map for the partition.
    async fn keys(&self, partition: u16) -> Result<HashMap<u64, String>, RegistryError>;
}

/// HTTP client for the chain gateway's registry query routes.
#[derive(Clone)]
pub struct HttpRegistryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("HTTP client"),
        }
    }

    async fn query_map(&self, route: &str, partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
        let url = format!("{}/{}?subnet={}", self.base_url, route, partition);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn addresses(&self, partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
        self.query_map("query_map_addresses", partition).await
    }

    async fn keys(&self, partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
        self.query_map("query_map_keys", partition).await
    }
}
