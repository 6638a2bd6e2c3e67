use async_trait::async_trait;
use rand::seq::SliceRandom;

use arbiter_common::types::Task;

/// Supplies the sample task dispatched to every worker of a cycle.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn next_task(&self) -> Result<Task, String>;
}

/// Samples a topic from a fixed catalog and templates the task payload.
///
/// The generative expansion of the topic is an external concern; the
/// catalog source keeps the payload deterministic given the topic.
pub struct CatalogTaskSource {
    topics: Vec<String>,
}

impl CatalogTaskSource {
    pub fn new(topics: Vec<String>) -> Self {
        Self { topics }
    }
}

#[async_trait]
impl TaskSource for CatalogTaskSource {
    async fn next_task(&self) -> Result<Task, String> {
        let topic = self
            .topics
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| "topic catalog is empty".to_string())?
            .clone();

        let payload = format!("Please provide a short informative paragraph about {topic}.");
        Ok(Task { topic, payload })
    }
}
