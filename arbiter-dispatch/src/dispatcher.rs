use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use arbiter_common::types::{Task, WorkerEndpoint, WorkerResponse};

use crate::client::WorkerClient;
use crate::error::DispatchError;

/// Fans a single task out to N endpoints concurrently.
pub struct Dispatcher {
    client: Arc<dyn WorkerClient>,
    per_call_timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn WorkerClient>, per_call_timeout: Duration) -> Self {
        Self { client, per_call_timeout }
    }

    /// Issues one call per endpoint and waits for all of them to complete or
    /// time out. Returns exactly one `WorkerResponse` per input endpoint.
    ///
    /// The per-call timeout is enforced independently; a slow worker is
    /// cancelled by its own timer and never delays or cancels the others.
    /// There is no early return on first success or failure.
    pub async fn fan_out(&self, task: &Task, endpoints: &[WorkerEndpoint]) -> Vec<WorkerResponse> {
        let calls = endpoints.iter().map(|endpoint| {
            let client = Arc::clone(&self.client);
            let task = task.clone();
            let uid = endpoint.uid;
            let address = endpoint.address.clone();
            let per_call = self.per_call_timeout;

            async move {
                match timeout(per_call, client.generate(&address, &task)).await {
                    Ok(Ok(payload)) => {
                        debug!(uid, bytes = payload.len(), "worker responded");
                        WorkerResponse { uid, payload: Some(payload), error: None }
                    }
                    Ok(Err(e)) => {
                        warn!(uid, address, "worker call failed: {e}");
                        WorkerResponse { uid, payload: None, error: Some(e.to_string()) }
                    }
                    Err(_) => {
                        let e = DispatchError::Timeout(per_call.as_secs());
                        warn!(uid, address, "{e}");
                        WorkerResponse { uid, payload: None, error: Some(e.to_string()) }
                    }
                }
            }
        });

        join_all(calls).await
    }
}
