use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use arbiter_common::types::{ReferenceAnswer, ScoredResponse, WorkerResponse};

use crate::processor::WorkProcessor;
use crate::FALLBACK_SCORE;

/// Scores every worker response of a cycle against the reference answer.
pub struct Scorer {
    processor: Arc<dyn WorkProcessor>,
    excluded_uids: HashSet<u64>,
}

impl Scorer {
    pub fn new(processor: Arc<dyn WorkProcessor>, excluded_uids: HashSet<u64>) -> Self {
        Self { processor, excluded_uids }
    }

    /// One `ScoredResponse` per input response, in input order — except for
    /// uids in the known-validator exclusion set, which are skipped entirely
    /// (never scored, never weighted).
    ///
    /// Missing, empty, or unparseable payloads get `FALLBACK_SCORE`; scored
    /// payloads are clamped to `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if the processor produces NaN — that is a bug in the
    /// processor, not an external fault.
    pub fn score_all(
        &self,
        responses: &[WorkerResponse],
        reference: &ReferenceAnswer,
    ) -> Vec<ScoredResponse> {
        let mut scored = Vec::with_capacity(responses.len());

        for response in responses {
            if self.excluded_uids.contains(&response.uid) {
                debug!(uid = response.uid, "skipping known validator uid");
                continue;
            }

            let raw_score = match response.payload.as_deref().and_then(extract_text) {
                Some(text) => {
                    let s = self.processor.similarity(&reference.payload, &text);
                    assert!(!s.is_nan(), "similarity produced NaN for uid {}", response.uid);
                    s.clamp(0.0, 1.0)
                }
                None => FALLBACK_SCORE,
            };

            debug!(uid = response.uid, raw_score, "scored response");
            scored.push(ScoredResponse { uid: response.uid, raw_score });
        }

        scored
    }
}

/// Unwraps a worker payload into scorable text.
///
/// Workers answer with free-form text or JSON-wrapped text; a JSON body
/// without a recognized text field counts as unparseable and yields `None`.
fn extract_text(payload: &str) -> Option<String> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(value @ serde_json::Value::Object(_)) => value
            .pointer("/choices/0/message/content")
            .or_else(|| value.pointer("/text"))
            .or_else(|| value.pointer("/output"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        Ok(_) => None,
        // not JSON at all: treat the body as plain text
        Err(_) => Some(trimmed.to_string()),
    }
}
