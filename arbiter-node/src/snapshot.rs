use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use arbiter_common::types::WeightVector;

/// Last computed `{uid -> weight}` mapping of one partition, persisted for
/// external inspection. A side effect only — a failed write is logged by
/// the caller and never fails the cycle.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeightsSnapshot {
    pub partition: u16,
    /// RFC 3339 wall-clock time of the cycle that produced the mapping.
    pub written_at: String,
    pub weights: BTreeMap<u64, f64>,
}

/// Writes `weights-{partition}.json` under `dir`, creating it if needed.
pub fn write(dir: &Path, partition: u16, vector: &WeightVector) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let snapshot = WeightsSnapshot {
        partition,
        written_at: chrono::Utc::now().to_rfc3339(),
        weights: vector.entries().collect(),
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let path = dir.join(format!("weights-{partition}.json"));
    fs::write(&path, json)?;
    Ok(path)
}
