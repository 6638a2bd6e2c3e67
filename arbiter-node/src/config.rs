use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Chain gateway base URL for registry queries.
    pub registry_url: String,
    /// Chain gateway base URL for vote submission.
    pub ledger_url: String,
    /// Path of the 32-byte ed25519 seed file.
    pub keypair_path: String,
    /// Partitions scored and voted on independently, in order, each tick.
    pub partitions: Vec<u16>,
    /// This validator's own uid on the listing, filtered at discovery time.
    pub own_uid: Option<u64>,
    /// Known-validator uids that are never scored or weighted.
    pub excluded_uids: Vec<u64>,
    /// Seconds between vote cycles.
    pub cadence_secs: u64,
    /// Per-worker-call timeout, seconds.
    pub worker_timeout_secs: u64,
    /// Work-processor strategy key.
    pub processor: String,
    /// Topic catalog the task source samples from.
    pub topics: Vec<String>,
    /// Directory the per-partition weights snapshots are written to.
    pub snapshot_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: "http://127.0.0.1:8900".to_string(),
            ledger_url: "http://127.0.0.1:8900".to_string(),
            keypair_path: "keys/keypair".to_string(),
            partitions: vec![10, 0],
            own_uid: None,
            excluded_uids: Vec::new(),
            cadence_secs: 30,
            worker_timeout_secs: 10,
            processor: "token-overlap".to_string(),
            topics: vec![
                "glacier formation".to_string(),
                "the history of container shipping".to_string(),
                "bee navigation".to_string(),
                "volcanic lightning".to_string(),
                "deep sea bioluminescence".to_string(),
            ],
            snapshot_dir: "data/weights".to_string(),
        }
    }
}

impl Config {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let parsed = serde_json::from_str::<Config>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(parsed)
    }
}

/// Generates a default config at `path` when none exists yet.
pub fn ensure_config(path: &str) -> io::Result<()> {
    if !Path::new(path).exists() {
        info!("⚠️ No config found. Generating defaults at {}...", path);
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        Config::default().save_to_file(path)?;
        info!("✅ Config generated");
    }
    Ok(())
}
