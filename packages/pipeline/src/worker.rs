use tokio::signal::unix::{signal, SignalKind};

use crate::config::ScanConfig;
use crate::db;
use crate::error::{PipelineError, Result};
use crate::ingest::run_scan;
use crate::scan;
use crate::store::PgSink;

/// Run the scan worker.
///
/// Connects and migrates, scans the input directory once, logs a summary,
/// then idles until SIGTERM or SIGINT (ctrl+c). With `once` set it returns
/// right after the scan.
pub async fn run_scan_worker(config: ScanConfig) -> Result<()> {
    // Fail before touching the database if the input directory is unusable
    scan::ensure_input_dir(&config.input_dir).await?;

    let pool = db::connect(&config.pipeline_config()).await?;
    let sink = PgSink::new(pool);

    tracing::info!(
        input_dir = %config.input_dir.display(),
        profile = %config.profile,
        once = config.once,
        "starting scan worker"
    );

    let summary = run_scan(&config.input_dir, config.profile, &sink).await?;
    tracing::info!(
        files = summary.files_found,
        processed = summary.files_processed,
        skipped = summary.files_failed,
        extracted = summary.records_extracted,
        inserted = summary.records_inserted,
        failed = summary.records_failed,
        "scan complete"
    );

    if config.once {
        return Ok(());
    }

    wait_for_shutdown().await
}

async fn wait_for_shutdown() -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate()).map_err(|e| {
        PipelineError::Worker(format!("failed to register SIGTERM handler: {e}"))
    })?;

    tracing::info!("waiting for shutdown signal");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received SIGINT, stopping worker");
        }
        _ = sigterm.recv() => {
            tracing::info!("received SIGTERM, stopping worker");
        }
    }

    Ok(())
}
