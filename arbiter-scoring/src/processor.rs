use std::collections::HashSet;
use std::sync::Arc;

use arbiter_common::types::{ReferenceAnswer, Task};

use crate::error::ScoringError;

/// Work-processor collaborator: computes the reference answer for a task and
/// scores two answers against each other.
///
/// Implementations are registered at startup and selected by configuration
/// key; there is no runtime plugin loading.
pub trait WorkProcessor: Send + Sync {
    /// The canonical answer the workers' responses are compared against.
    fn reference(&self, task: &Task) -> ReferenceAnswer;

    /// Bounded similarity of two answers. Must return a finite value; the
    /// scorer clamps it to `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Resolves a processor strategy from its configuration key.
pub fn processor_for(key: &str) -> Result<Arc<dyn WorkProcessor>, ScoringError> {
    match key {
        "token-overlap" => Ok(Arc::new(TokenOverlapProcessor)),
        "exact-match" => Ok(Arc::new(ExactMatchProcessor)),
        other => Err(ScoringError::UnknownProcessor(other.to_string())),
    }
}

fn canonical(text: &str) -> String {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Token-overlap similarity: intersection over union of lowercased
/// whitespace tokens. Identical texts score 1.0, disjoint texts 0.0.
pub struct TokenOverlapProcessor;

impl WorkProcessor for TokenOverlapProcessor {
    fn reference(&self, task: &Task) -> ReferenceAnswer {
        ReferenceAnswer { payload: canonical(&task.payload) }
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        let ta = tokens(a);
        let tb = tokens(b);
        if ta.is_empty() && tb.is_empty() {
            return 1.0;
        }
        let intersection = ta.intersection(&tb).count();
        let union = ta.union(&tb).count();
        intersection as f64 / union as f64
    }
}

/// Degenerate strategy: 1.0 when the canonical forms match, 0.0 otherwise.
pub struct ExactMatchProcessor;

impl WorkProcessor for ExactMatchProcessor {
    fn reference(&self, task: &Task) -> ReferenceAnswer {
        ReferenceAnswer { payload: canonical(&task.payload) }
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if canonical(a) == canonical(b) {
            1.0
        } else {
            0.0
        }
    }
}
