use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{self, Duration};
use tracing::{info, warn};

use arbiter_dispatch::Dispatcher;
use arbiter_ledger::Submitter;
use arbiter_registry::Directory;
use arbiter_scoring::{Scorer, WorkProcessor};

use crate::config::Config;
use crate::cycle::CycleState;
use crate::error::CycleError;
use crate::snapshot;
use crate::task_source::TaskSource;

/// The collaborators one cycle runs through, in pipeline order.
///
/// All of them are stateless over their inputs; the only mutable per-cycle
/// state is the `CycleState` owned by `run_cycle`.
pub struct Pipeline {
    pub directory: Directory,
    pub dispatcher: Dispatcher,
    pub scorer: Scorer,
    pub submitter: Submitter,
    pub tasks: Arc<dyn TaskSource>,
    pub processor: Arc<dyn WorkProcessor>,
}

/// Drives one full dispatch → score → normalize → submit cycle per
/// partition on a fixed cadence.
///
/// Two states only: Idle (sleeping on the cadence timer) and Running (one
/// tick in progress). Shutdown is abrupt between cycles — the flag is
/// checked only while Idle, so an in-flight fan-out always finishes or hits
/// its timeouts before the loop exits.
pub struct VoteLoop {
    pipeline: Pipeline,
    partitions: Vec<u16>,
    cadence: Duration,
    snapshot_dir: PathBuf,
    shutdown: watch::Receiver<bool>,
}

impl VoteLoop {
    pub fn new(pipeline: Pipeline, config: &Config, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            pipeline,
            partitions: config.partitions.clone(),
            cadence: Duration::from_secs(config.cadence_secs),
            snapshot_dir: PathBuf::from(&config.snapshot_dir),
            shutdown,
        }
    }

    pub async fn run(self) {
        info!(cadence_secs = self.cadence.as_secs(), "vote loop started");
        let mut cadence = time::interval(self.cadence);
        let mut shutdown = self.shutdown.clone();

        loop {
            tokio::select! {
                _ = cadence.tick() => {
                    self.run_tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("vote loop stopped");
    }

    /// One tick: each configured partition gets an independent cycle.
    /// A failed partition never blocks the next one.
    pub async fn run_tick(&self) {
        for &partition in &self.partitions {
            if let Err(e) = self.run_cycle(partition).await {
                warn!(partition, "cycle skipped: {e}");
            }
        }
    }

    /// One full cycle for one partition, in strict sequence.
    ///
    /// Recoverable failures surface as `CycleError`; a ledger refusal is
    /// logged here and deliberately not an error — the next cycle proceeds
    /// regardless.
    pub async fn run_cycle(&self, partition: u16) -> Result<(), CycleError> {
        let endpoints = self.pipeline.directory.list(partition).await?;
        if endpoints.is_empty() {
            info!(partition, "no usable endpoints, skipping cycle");
            return Ok(());
        }

        let task = self
            .pipeline
            .tasks
            .next_task()
            .await
            .map_err(CycleError::TaskSource)?;
        let reference = self.pipeline.processor.reference(&task);

        let responses = self.pipeline.dispatcher.fan_out(&task, &endpoints).await;
        let scored = self.pipeline.scorer.score_all(&responses, &reference);
        if scored.is_empty() {
            info!(partition, "nothing scorable this cycle");
            return Ok(());
        }

        let mut state = CycleState::new(partition);
        for entry in &scored {
            state.record(entry.uid, entry.raw_score);
        }
        let vector = state.into_weight_vector();

        if let Err(e) = snapshot::write(&self.snapshot_dir, partition, &vector) {
            warn!(partition, "failed to persist weights snapshot: {e}");
        }

        match self.pipeline.submitter.submit(partition, &vector).await {
            Ok(receipt) => {
                tracing::info!(
                    target: "vote",
                    "EVENT:SUBMIT partition={} entries={} at={}",
                    partition,
                    receipt.entries,
                    receipt.submitted_at.to_rfc3339()
                );
            }
            Err(e) => {
                warn!(partition, "vote submission failed: {e}");
            }
        }

        Ok(())
    }
}
