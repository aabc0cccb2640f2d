//! Bulk product-code pre-resolution.
//!
//! Walks the input file and performs only the name-search step for every
//! record, filling the product-code cache without fetching product or
//! availability pages. A later scrape run over the same input then skips
//! the search path entirely for everything resolved here.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use janwatch_core::progress::{INPUT_SCOPE, RUN_SCOPE};
use janwatch_core::{AppConfig, Phase, ProgressEvent};
use janwatch_scraper::PageClient;
use janwatch_store::{cache_path_for_input, read_input_file, ProductCodeCache};

use crate::error::RunError;
use crate::events::ProgressSink;
use crate::resolver::{Resolution, Resolver};

#[derive(Debug)]
pub struct PrecomputeReport {
    /// Entries now present in the cache for this input's records,
    /// including ones cached by earlier runs.
    pub resolved: usize,
    pub missed: usize,
    pub failed: usize,
}

/// Resolves product codes for every record in `input_path` into the cache
/// file next to it. Per-record failures are isolated; the inter-item delay
/// applies after every record.
///
/// # Errors
///
/// Returns [`RunError`] if the input file cannot be read or the HTTP
/// client cannot be built.
pub async fn run_precompute(
    config: &AppConfig,
    input_path: &Path,
    delay_ms: u64,
    events: &ProgressSink,
    cancel: &CancellationToken,
) -> Result<PrecomputeReport, RunError> {
    let input = read_input_file(input_path).map_err(RunError::Input)?;
    for line_error in &input.line_errors {
        events.publish(ProgressEvent::error(
            INPUT_SCOPE,
            format!("line {}: {}", line_error.line_number, line_error.error),
            Phase::End,
        ));
    }

    let cache = ProductCodeCache::load(cache_path_for_input(input_path))?;
    let client = Arc::new(PageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
    )?);
    let resolver = Resolver::new(client, cache, config.base_url.clone());

    let mut resolved = 0usize;
    let mut missed = 0usize;
    let mut failed = 0usize;

    for record in &input.records {
        if cancel.is_cancelled() {
            break;
        }
        match resolver.resolve(record).await {
            Ok(Resolution::Resolved { .. }) => resolved += 1,
            Ok(Resolution::Miss) => {
                missed += 1;
                events.publish(ProgressEvent::warning(
                    record.identifier.as_str(),
                    "product not found",
                    Phase::End,
                ));
            }
            Err(error) => {
                failed += 1;
                events.publish(ProgressEvent::exception(
                    record.identifier.as_str(),
                    error.to_string(),
                    Phase::End,
                ));
            }
        }
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    events.publish(ProgressEvent::info(RUN_SCOPE, "run complete", Phase::End));

    Ok(PrecomputeReport {
        resolved,
        missed,
        failed,
    })
}
