use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::prelude::*;

use arbiter_common::auth::Ed25519Signer;
use arbiter_dispatch::{Dispatcher, HttpWorkerClient};
use arbiter_ledger::{HttpLedgerClient, Submitter};
use arbiter_node::cli::Args;
use arbiter_node::config::{ensure_config, Config};
use arbiter_node::task_source::CatalogTaskSource;
use arbiter_node::vote_loop::{Pipeline, VoteLoop};
use arbiter_registry::{Directory, HttpRegistryClient};
use arbiter_scoring::{processor_for, Scorer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging: stdout for operators, a file layer for the vote audit trail.
    let file_appender = tracing_appender::rolling::never("logs", "audit-vote.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let vote_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target() == "vote"
        }));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,arbiter_node=debug".into()),
        )
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target() != "vote"
        }));

    tracing_subscriber::registry()
        .with(vote_layer)
        .with(stdout_layer)
        .init();

    info!("--- STARTING ARBITER VALIDATOR ---");
    info!("Config: {}", args.config_path);

    ensure_config(&args.config_path)?;
    let config = Config::load_from_file(&args.config_path)?;

    let keypair_path = args.keypair_path.unwrap_or_else(|| config.keypair_path.clone());
    let signer = Arc::new(Ed25519Signer::load_or_generate(Path::new(&keypair_path))?);
    info!("Validator key loaded from {}", keypair_path);

    let registry = Arc::new(HttpRegistryClient::new(&config.registry_url));
    let directory = Directory::new(registry, config.own_uid);

    let worker_client = Arc::new(HttpWorkerClient::new());
    let dispatcher = Dispatcher::new(
        worker_client,
        Duration::from_secs(config.worker_timeout_secs),
    );

    let processor = processor_for(&config.processor)?;
    let excluded: HashSet<u64> = config.excluded_uids.iter().copied().collect();
    let scorer = Scorer::new(Arc::clone(&processor), excluded);

    let ledger = Arc::new(HttpLedgerClient::new(&config.ledger_url, signer));
    let submitter = Submitter::new(ledger);

    let tasks = Arc::new(CatalogTaskSource::new(config.topics.clone()));

    let pipeline = Pipeline { directory, dispatcher, scorer, submitter, tasks, processor };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let vote_loop = VoteLoop::new(pipeline, &config, shutdown_rx);
    let handle = tokio::spawn(vote_loop.run());

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, letting the in-flight cycle finish...");
    shutdown_tx.send(true).ok();
    handle.await?;

    Ok(())
}
