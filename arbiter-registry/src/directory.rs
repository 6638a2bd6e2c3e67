use std::sync::Arc;

use tracing::{debug, info};

use arbiter_common::types::WorkerEndpoint;

use crate::client::RegistryClient;
use crate::error::RegistryError;

/// Addresses that must never be dispatched to: unset registrations,
/// placeholders, and anything pointing back at the local host.
const ADDRESS_SKIPS: [&str; 5] = ["", "none:none", "localhost", "127.0.0.1", "0.0.0.0"];

/// Normalizes the raw registry listing of a partition into usable endpoints.
///
/// Stateless: each `list` call queries the registry fresh and the result is
/// discarded with the cycle that consumed it.
pub struct Directory {
    registry: Arc<dyn RegistryClient>,
    own_uid: Option<u64>,
}

impl Directory {
    pub fn new(registry: Arc<dyn RegistryClient>, own_uid: Option<u64>) -> Self {
        Self { registry, own_uid }
    }

    /// Returns the dispatchable endpoints of a partition, sorted by uid.
    ///
    /// The validator's own uid and sentinel/loopback addresses are filtered
    /// out. A registry failure is returned as-is; callers treat it as "skip
    /// this partition this cycle".
    pub async fn list(&self, partition: u16) -> Result<Vec<WorkerEndpoint>, RegistryError> {
        let addresses = self.registry.addresses(partition).await?;
        let keys = self.registry.keys(partition).await?;

        let mut endpoints = Vec::with_capacity(addresses.len());
        for (uid, address) in addresses {
            if self.own_uid == Some(uid) {
                debug!(uid, "skipping own uid");
                continue;
            }
            if is_excluded(&address) {
                debug!(uid, address, "skipping sentinel address");
                continue;
            }
            let registered_key = keys.get(&uid).cloned().unwrap_or_default();
            endpoints.push(WorkerEndpoint { uid, address, registered_key });
        }

        endpoints.sort_by_key(|e| e.uid);
        info!(partition, count = endpoints.len(), "collected worker endpoints");
        Ok(endpoints)
    }
}

fn is_excluded(address: &str) -> bool {
    let lower = address.trim().to_ascii_lowercase();
    if ADDRESS_SKIPS.contains(&lower.as_str()) {
        return true;
    }
    // host:port and scheme://host:port forms are judged by their host part
    let without_scheme = lower.split("://").last().unwrap_or(&lower);
    let host = without_scheme.split(':').next().unwrap_or("");
    matches!(host, "" | "none" | "localhost" | "127.0.0.1" | "0.0.0.0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeRegistry {
        addresses: HashMap<u64, String>,
        keys: HashMap<u64, String>,
    }

    #[async_trait]
    impl RegistryClient for FakeRegistry {
        async fn addresses(&self, _partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
            Ok(self.addresses.clone())
        }

        async fn keys(&self, _partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
            Ok(self.keys.clone())
        }
    }

    struct DownRegistry;

    #[async_trait]
    impl RegistryClient for DownRegistry {
        async fn addresses(&self, _partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
            Err(RegistryError::Transport("connection refused".into()))
        }

        async fn keys(&self, _partition: u16) -> Result<HashMap<u64, String>, RegistryError> {
            Err(RegistryError::Transport("connection refused".into()))
        }
    }

    #[test]
    fn test_sentinel_addresses_are_excluded() {
        assert!(is_excluded(""));
        assert!(is_excluded("none:none"));
        assert!(is_excluded("localhost"));
        assert!(is_excluded("127.0.0.1:8000"));
        assert!(is_excluded("0.0.0.0:9100"));
        assert!(is_excluded("http://localhost:8080"));
        assert!(!is_excluded("10.1.2.3:8000"));
        assert!(!is_excluded("worker.example.net:443"));
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let mut addresses = HashMap::new();
        addresses.insert(3, "10.0.0.3:8000".to_string());
        addresses.insert(1, "10.0.0.1:8000".to_string());
        addresses.insert(2, "none:none".to_string());
        addresses.insert(7, "127.0.0.1:8000".to_string());
        addresses.insert(9, "10.0.0.9:8000".to_string()); // own uid

        let mut keys = HashMap::new();
        keys.insert(1, "key-1".to_string());
        keys.insert(3, "key-3".to_string());

        let directory = Directory::new(Arc::new(FakeRegistry { addresses, keys }), Some(9));
        let endpoints = directory.list(10).await.unwrap();

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].uid, 1);
        assert_eq!(endpoints[0].registered_key, "key-1");
        assert_eq!(endpoints[1].uid, 3);
    }

    #[tokio::test]
    async fn test_registry_failure_is_recoverable() {
        let directory = Directory::new(Arc::new(DownRegistry), None);
        let err = directory.list(10).await.unwrap_err();
        assert!(matches!(err, RegistryError::Transport(_)));
    }
}
