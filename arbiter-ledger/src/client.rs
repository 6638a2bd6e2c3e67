use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use arbiter_common::auth::Signer;

use crate::error::LedgerError;

/// Accepted-vote receipt handed back to the submitter.
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    pub partition: u16,
    pub entries: usize,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Opaque ledger collaborator: signs and writes one weight vector on-chain.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn vote(
        &self,
        partition: u16,
        uids: &[u64],
        weights: &[f64],
    ) -> Result<VoteReceipt, LedgerError>;
}

/// The portion of the vote call covered by the signature. Signing bytes are
/// the bincode serialization of this view, so both sides agree on a
/// canonical byte layout independent of the JSON envelope.
#[derive(Serialize)]
struct VoteSignView<'a> {
    partition: u16,
    uids: &'a [u64],
    weights: &'a [f64],
}

fn signing_bytes(partition: u16, uids: &[u64], weights: &[f64]) -> Vec<u8> {
    bincode::serialize(&VoteSignView { partition, uids, weights })
        .expect("vote sign view serialization cannot fail")
}

#[derive(Serialize)]
struct VoteEnvelope<'a> {
    partition: u16,
    uids: &'a [u64],
    weights: &'a [f64],
    signature: String,
    public_key: String,
}

#[derive(Deserialize)]
struct VoteOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the chain gateway's vote route.
pub struct HttpLedgerClient {
    base_url: String,
    client: reqwest::Client,
    signer: Arc<dyn Signer>,
}

impl HttpLedgerClient {
    pub fn new(base_url: &str, signer: Arc<dyn Signer>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("HTTP client"),
            signer,
        }
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn vote(
        &self,
        partition: u16,
        uids: &[u64],
        weights: &[f64],
    ) -> Result<VoteReceipt, LedgerError> {
        let message = signing_bytes(partition, uids, weights);
        let signature = self.signer.sign(&message)?;

        let envelope = VoteEnvelope {
            partition,
            uids,
            weights,
            signature: hex::encode(&signature),
            public_key: hex::encode(self.signer.public_key()),
        };

        debug!(partition, entries = uids.len(), "submitting signed vote");

        let url = format!("{}/vote", self.base_url);
        let response = self.client.post(&url).json(&envelope).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Status(response.status().as_u16()));
        }

        let outcome: VoteOutcome = response
            .json()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if outcome.success {
            Ok(VoteReceipt {
                partition,
                entries: uids.len(),
                submitted_at: chrono::Utc::now(),
            })
        } else {
            Err(LedgerError::Rejected(
                outcome.error.unwrap_or_else(|| "unspecified ledger error".to_string()),
            ))
        }
    }
}
