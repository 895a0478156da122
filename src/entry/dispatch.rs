use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::args::{Command, ExporterArgs};
use crate::batch::{Batch, BatchReport, TracingObserver};
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::SpeedtestCommand;
use crate::shutdown::ShutdownReceiver;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::store::FsArtifactStore;

/// What one invocation does each time the batch fires.
#[derive(Debug, Clone)]
pub(super) struct BatchPlan {
    pub(super) command: Command,
    pub(super) interfaces: Vec<String>,
    pub(super) fail_on_error: bool,
}

impl BatchPlan {
    fn from_args(args: &ExporterArgs) -> Self {
        Self {
            command: args.selected_command(),
            interfaces: args.interfaces.as_slice().to_vec(),
            fail_on_error: args.fail_on_error,
        }
    }
}

pub(super) async fn execute(args: ExporterArgs) -> AppResult<()> {
    let batch = build_batch(&args);
    let plan = BatchPlan::from_args(&args);

    if args.interfaces.is_empty() && plan.command != Command::Convert {
        tracing::warn!("No network interfaces configured; nothing to probe");
    }

    tracing::debug!(
        "Raw directory {}, metrics directory {}",
        args.raw_dir.display(),
        args.metrics_dir.display()
    );

    match args.every {
        None => {
            let report = run_once(&batch, &plan).await?;
            check_report(&report, plan.fail_on_error)
        }
        Some(period) => {
            let (shutdown_tx, shutdown_rx) = shutdown_channel();
            let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

            let completed = run_periodic(&batch, &plan, period, shutdown_rx).await;
            tracing::info!("Stopped after {} batch(es)", completed);

            drop(shutdown_tx.send(()));
            if let Err(err) = signal_handle.await {
                tracing::debug!("Signal handler task ended abnormally: {}", err);
            }
            Ok(())
        }
    }
}

fn build_batch(args: &ExporterArgs) -> Batch {
    let store = Arc::new(FsArtifactStore::new(&args.raw_dir, &args.metrics_dir));
    let executor = Arc::new(SpeedtestCommand::new(
        args.speedtest_bin.clone(),
        !args.no_accept_gdpr,
        args.probe_timeout,
    ));
    Batch::new(executor, store, Arc::new(TracingObserver))
}

pub(super) async fn run_once(batch: &Batch, plan: &BatchPlan) -> AppResult<BatchReport> {
    match plan.command {
        Command::Run => batch.run(&plan.interfaces).await,
        Command::Probe => batch.probe_all(&plan.interfaces).await,
        Command::Convert => batch.convert_all().await,
    }
}

pub(super) fn check_report(report: &BatchReport, fail_on_error: bool) -> AppResult<()> {
    if fail_on_error && !report.is_clean() {
        return Err(AppError::validation(ValidationError::BatchFailures {
            count: report.failures.len(),
        }));
    }
    Ok(())
}

/// Fires the batch on every tick until shutdown is signalled and returns how
/// many batches ran. Errors never end the loop.
pub(super) async fn run_periodic(
    batch: &Batch,
    plan: &BatchPlan,
    period: Duration,
    mut shutdown_rx: ShutdownReceiver,
) -> usize {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!("Running every {:?} until interrupted", period);

    let mut completed = 0_usize;
    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            _ = ticker.tick() => {}
        }

        match run_once(batch, plan).await {
            Ok(report) => {
                if let Err(err) = check_report(&report, plan.fail_on_error) {
                    tracing::warn!("{}", err);
                }
            }
            Err(err) => tracing::error!("Batch aborted: {}", err),
        }
        completed = completed.saturating_add(1);
    }
    completed
}
