use std::sync::Arc;

use tracing::{debug, info};

use arbiter_common::types::WeightVector;

use crate::client::{LedgerClient, VoteReceipt};
use crate::error::LedgerError;

/// Packages a cycle's weight vector and hands it to the ledger client.
pub struct Submitter {
    ledger: Arc<dyn LedgerClient>,
}

impl Submitter {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Submits the vector for one partition.
    ///
    /// Signing and the on-ledger write are the client's concern; this only
    /// packages the call and interprets the outcome. A returned error is
    /// non-fatal to the caller.
    ///
    /// # Panics
    ///
    /// Panics before any network call if the uid and weight arrays have
    /// diverged or a weight is not finite — both indicate a bug in the
    /// pipeline, not an external fault.
    pub async fn submit(
        &self,
        partition: u16,
        vector: &WeightVector,
    ) -> Result<VoteReceipt, LedgerError> {
        assert_eq!(
            vector.uids.len(),
            vector.weights.len(),
            "uid/weight arrays diverged before submission"
        );
        for (uid, weight) in vector.entries() {
            assert!(weight.is_finite(), "non-finite weight for uid {uid}");
        }

        let receipt = self.ledger.vote(partition, &vector.uids, &vector.weights).await?;

        info!(
            partition,
            entries = receipt.entries,
            "🗳️ weight vector accepted by ledger"
        );
        for (uid, weight) in vector.entries() {
            debug!(partition, uid, weight, "accepted weight");
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingLedger {
        calls: Mutex<Vec<(u16, Vec<u64>, Vec<f64>)>>,
        reject: bool,
    }

    #[async_trait]
    impl LedgerClient for RecordingLedger {
        async fn vote(
            &self,
            partition: u16,
            uids: &[u64],
            weights: &[f64],
        ) -> Result<VoteReceipt, LedgerError> {
            self.calls.lock().await.push((partition, uids.to_vec(), weights.to_vec()));
            if self.reject {
                return Err(LedgerError::Rejected("stale nonce".into()));
            }
            Ok(VoteReceipt {
                partition,
                entries: uids.len(),
                submitted_at: chrono::Utc::now(),
            })
        }
    }

    #[tokio::test]
    async fn test_submit_delegates_to_ledger() {
        let ledger = Arc::new(RecordingLedger::default());
        let submitter = Submitter::new(Arc::clone(&ledger) as Arc<dyn LedgerClient>);

        let vector = WeightVector { uids: vec![1, 2, 3], weights: vec![1.0, 0.5, 0.0] };
        let receipt = submitter.submit(10, &vector).await.unwrap();

        assert_eq!(receipt.entries, 3);
        let calls = ledger.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_rejection_is_surfaced_as_error() {
        let ledger = Arc::new(RecordingLedger { reject: true, ..Default::default() });
        let submitter = Submitter::new(ledger);

        let vector = WeightVector { uids: vec![1], weights: vec![1.0] };
        let err = submitter.submit(10, &vector).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rejected(_)));
    }

    #[tokio::test]
    #[should_panic(expected = "diverged")]
    async fn test_mismatched_lengths_fail_fast() {
        let ledger = Arc::new(RecordingLedger::default());
        let submitter = Submitter::new(Arc::clone(&ledger) as Arc<dyn LedgerClient>);

        let vector = WeightVector { uids: vec![1, 2], weights: vec![1.0] };
        let _ = submitter.submit(10, &vector).await;
    }

    #[tokio::test]
    async fn test_mismatch_panics_before_any_network_call() {
        let ledger = Arc::new(RecordingLedger::default());
        let submitter = Submitter::new(Arc::clone(&ledger) as Arc<dyn LedgerClient>);

        let vector = WeightVector { uids: vec![1, 2], weights: vec![1.0] };
        let result = tokio::spawn(async move { submitter.submit(10, &vector).await }).await;
        assert!(result.is_err(), "submit should have panicked");

        assert!(ledger.calls.lock().await.is_empty(), "ledger must not be called");
    }
}
