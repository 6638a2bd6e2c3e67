//! types.rs
//!
//! Per-cycle entities shared across the Arbiter crates.
//!
//! Everything here is created, consumed, and discarded within a single vote
//! cycle; nothing is persisted across cycles except through the weights
//! snapshot written by the node.

use serde::{Deserialize, Serialize};

/// A worker endpoint as returned by the registry for one partition,
/// after sentinel/loopback filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEndpoint {
    pub uid: u64,
    /// `host:port` or full URL. Never empty, loopback, or `none:none` —
    /// the directory filters those out before dispatch.
    pub address: String,
    pub registered_key: String,
}

/// One sample task, produced once per cycle by the task source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub topic: String,
    pub payload: String,
}

/// The locally computed baseline all worker responses are scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAnswer {
    pub payload: String,
}

/// Outcome of one dispatched worker call.
///
/// `payload` is `None` on timeout or transport failure. That is a valid
/// outcome for the pipeline, not an error state: the scorer assigns the
/// fallback score to such entries.
#[derive(Debug, Clone)]
pub struct WorkerResponse {
    pub uid: u64,
    pub payload: Option<String>,
    pub error: Option<String>,
}

/// A worker's raw similarity score for the current cycle, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResponse {
    pub uid: u64,
    pub raw_score: f64,
}

/// Index-aligned parallel arrays of uids and normalized weights.
///
/// Rebuilt fresh each cycle. Weights are relative scaling factors consumed
/// by the ledger's own stake-weighting; they are not required to sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub uids: Vec<u64>,
    pub weights: Vec<f64>,
}

impl WeightVector {
    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    /// Iterates the `(uid, weight)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.uids.iter().copied().zip(self.weights.iter().copied())
    }
}
