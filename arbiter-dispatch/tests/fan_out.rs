use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use arbiter_common::types::{Task, WorkerEndpoint};
use arbiter_dispatch::{DispatchError, Dispatcher, WorkerClient};

/// Worker transport scripted per address: echo, fail, or hang.
struct ScriptedClient {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl WorkerClient for ScriptedClient {
    async fn generate(&self, address: &str, task: &Task) -> Result<String, DispatchError> {
        self.calls.lock().await.push(address.to_string());
        match address {
            a if a.starts_with("echo") => Ok(task.payload.clone()),
            a if a.starts_with("fail") => Err(DispatchError::Transport("connection reset".into())),
            a if a.starts_with("hang") => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("hanging call should be cancelled by the dispatcher timeout")
            }
            other => panic!("unexpected address {other}"),
        }
    }
}

fn endpoint(uid: u64, address: &str) -> WorkerEndpoint {
    WorkerEndpoint { uid, address: address.to_string(), registered_key: format!("key-{uid}") }
}

fn task() -> Task {
    Task { topic: "glaciers".into(), payload: "a short paragraph about glaciers".into() }
}

#[tokio::test(start_paused = true)]
async fn test_one_response_per_endpoint() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = Arc::new(ScriptedClient { calls: Arc::clone(&calls) });
    let dispatcher = Dispatcher::new(client, Duration::from_secs(10));

    let endpoints = vec![endpoint(1, "echo-1"), endpoint(2, "fail-2"), endpoint(3, "hang-3")];
    let responses = dispatcher.fan_out(&task(), &endpoints).await;

    assert_eq!(responses.len(), endpoints.len());

    let ok = responses.iter().find(|r| r.uid == 1).unwrap();
    assert_eq!(ok.payload.as_deref(), Some("a short paragraph about glaciers"));
    assert!(ok.error.is_none());

    let failed = responses.iter().find(|r| r.uid == 2).unwrap();
    assert!(failed.payload.is_none());
    assert!(failed.error.as_deref().unwrap().contains("connection reset"));

    let timed_out = responses.iter().find(|r| r.uid == 3).unwrap();
    assert!(timed_out.payload.is_none());
    assert!(timed_out.error.as_deref().unwrap().contains("timed out"));

    assert_eq!(calls.lock().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_all_endpoints_failing_still_yields_full_list() {
    let client = Arc::new(ScriptedClient { calls: Arc::new(Mutex::new(Vec::new())) });
    let dispatcher = Dispatcher::new(client, Duration::from_millis(50));

    let endpoints = vec![endpoint(4, "hang-4"), endpoint(5, "hang-5"), endpoint(6, "fail-6")];
    let responses = dispatcher.fan_out(&task(), &endpoints).await;

    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.payload.is_none()));
    assert!(responses.iter().all(|r| r.error.is_some()));
}

#[tokio::test]
async fn test_empty_endpoint_list() {
    let client = Arc::new(ScriptedClient { calls: Arc::new(Mutex::new(Vec::new())) });
    let dispatcher = Dispatcher::new(client, Duration::from_secs(1));

    let responses = dispatcher.fan_out(&task(), &[]).await;
    assert!(responses.is_empty());
}
