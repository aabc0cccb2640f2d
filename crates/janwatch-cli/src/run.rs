//! Command handlers for the CLI.
//!
//! These own the progress-event consumer: events stream out as log lines
//! (or JSON lines with `--json`) while the engine works, and a one-line
//! summary prints at the end.

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use janwatch_core::{AppConfig, ProgressEvent, Severity};
use janwatch_engine::{run_precompute, BatchRunner, ProgressSink, RunOptions};

pub(crate) async fn run_scrape(
    config: AppConfig,
    options: RunOptions,
    json: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(receiver, json));

    let report = {
        let runner = BatchRunner::new(config, ProgressSink::new(sender));
        runner.run(&options, &cancel).await?
        // The runner (and with it the last sender) drops here, closing the
        // channel so the printer can drain and finish.
    };
    printer.await?;

    println!(
        "run {}: {} hits, {} misses, {} failed, {} skipped{}",
        report.run_id,
        report.hit_count,
        report.miss_count,
        report.failed_count,
        report.skipped_count,
        if report.cancelled { " (cancelled)" } else { "" },
    );
    if report.output_written {
        println!("results written to {}", options.output_path.display());
    }

    Ok(())
}

pub(crate) async fn run_resolve(
    config: AppConfig,
    input: PathBuf,
    delay_ms: u64,
    json: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(receiver, json));

    let report = {
        let sink = ProgressSink::new(sender);
        run_precompute(&config, &input, delay_ms, &sink, &cancel).await?
    };
    printer.await?;

    println!(
        "resolve: {} resolved, {} missed, {} failed",
        report.resolved, report.missed, report.failed
    );

    Ok(())
}

async fn print_events(mut receiver: UnboundedReceiver<ProgressEvent>, json: bool) {
    while let Some(event) = receiver.recv().await {
        if json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(error) => tracing::warn!(%error, "failed to serialize progress event"),
            }
            continue;
        }
        match event.severity {
            Severity::Info => tracing::info!(
                identifier = %event.identifier,
                phase = ?event.phase,
                "{}",
                event.message
            ),
            Severity::Warning => tracing::warn!(
                identifier = %event.identifier,
                phase = ?event.phase,
                "{}",
                event.message
            ),
            Severity::Error | Severity::Exception => tracing::error!(
                identifier = %event.identifier,
                phase = ?event.phase,
                "{}",
                event.message
            ),
        }
    }
}
