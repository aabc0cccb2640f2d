//! The batch orchestrator.
//!
//! Drives the per-identifier pipeline (screening → resolution →
//! extraction) across the whole input set under a caller-selected
//! concurrency strategy, isolates per-item failures, and reconciles the
//! two state stores at run end.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use janwatch_core::progress::{CACHE_SCOPE, INPUT_SCOPE, OUTPUT_SCOPE, RUN_SCOPE, UNPOSTED_SCOPE};
use janwatch_core::result::UNKNOWN;
use janwatch_core::{AppConfig, ExtractionResult, InputRecord, Phase, ProgressEvent};
use janwatch_scraper::{
    count_store_availability, parse_product_page, urls, FieldWarning, PageClient, ScrapeError,
};
use janwatch_store::{
    cache_path_for_input, read_input_file, write_results, ProductCodeCache, UnpostedSet,
};

use crate::error::RunError;
use crate::events::ProgressSink;
use crate::resolver::{Resolution, Resolver};
use crate::screening;

/// How the identifier set is scheduled across workers.
///
/// The choice never changes per-identifier semantics — only scheduling,
/// and whether the inter-item delay applies. The configured delay is
/// per-worker, not global, so total request rate scales with fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyStrategy {
    /// One worker; the configured delay runs after every identifier.
    Sequential,
    /// Fixed-size identifier groups, one worker per group, no delay.
    Chunked,
    /// One worker per identifier, unbounded fan-out, no delay.
    PerItem,
}

/// Per-run settings, passed in explicitly — no hidden globals.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub delay_ms: u64,
    pub include_unposted: bool,
    pub strategy: ConcurrencyStrategy,
}

#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    /// One entry per processed identifier, in input order.
    pub results: Vec<ExtractionResult>,
    pub hit_count: usize,
    pub miss_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub output_written: bool,
    pub cancelled: bool,
}

enum ItemStatus {
    Skipped,
    Miss { unposted_candidate: bool },
    Completed,
    Failed,
}

struct ItemOutcome {
    result: ExtractionResult,
    status: ItemStatus,
}

/// Everything a worker needs, shared read-only across the fan-out. The
/// resolver guards its own cache; the unposted set is read-only until the
/// workers are done.
struct RunContext {
    client: Arc<PageClient>,
    resolver: Resolver,
    unposted: UnpostedSet,
    events: ProgressSink,
    base_url: String,
    include_unposted: bool,
    today: NaiveDate,
}

pub struct BatchRunner {
    config: AppConfig,
    events: ProgressSink,
}

impl BatchRunner {
    #[must_use]
    pub fn new(config: AppConfig, events: ProgressSink) -> Self {
        Self { config, events }
    }

    /// Runs the whole batch.
    ///
    /// Whatever happens — success, cancellation, or a fatal error — one
    /// final Info/End "run complete" event is published before returning.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] only for failures outside the per-identifier
    /// boundary: an unreadable input file, a client that cannot be built,
    /// or a state-store write failure at run end. Per-identifier failures
    /// are absorbed and reported as Exception-severity events.
    pub async fn run(
        &self,
        options: &RunOptions,
        cancel: &CancellationToken,
    ) -> Result<RunReport, RunError> {
        let outcome = self.run_inner(options, cancel).await;
        if let Err(error) = &outcome {
            self.events.publish(ProgressEvent::exception(
                RUN_SCOPE,
                error.to_string(),
                Phase::End,
            ));
        }
        self.events
            .publish(ProgressEvent::info(RUN_SCOPE, "run complete", Phase::End));
        outcome
    }

    async fn run_inner(
        &self,
        options: &RunOptions,
        cancel: &CancellationToken,
    ) -> Result<RunReport, RunError> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            input = %options.input_path.display(),
            strategy = ?options.strategy,
            "starting run"
        );

        let input = read_input_file(&options.input_path).map_err(RunError::Input)?;
        for line_error in &input.line_errors {
            self.events.publish(ProgressEvent::error(
                INPUT_SCOPE,
                format!("line {}: {}", line_error.line_number, line_error.error),
                Phase::End,
            ));
        }
        self.events.publish(ProgressEvent::info(
            INPUT_SCOPE,
            "identifier file loaded",
            Phase::End,
        ));

        let unposted = UnpostedSet::load(&self.config.unposted_path)?;
        if unposted.was_present() {
            self.events.publish(ProgressEvent::info(
                UNPOSTED_SCOPE,
                "unposted file loaded",
                Phase::End,
            ));
        }

        let cache_path = cache_path_for_input(&options.input_path);
        let cache = ProductCodeCache::load(cache_path)?;
        if cache.was_present() {
            self.events.publish(ProgressEvent::info(
                CACHE_SCOPE,
                "product-code cache loaded",
                Phase::End,
            ));
        }

        let client = Arc::new(PageClient::new(
            self.config.request_timeout_secs,
            &self.config.user_agent,
        )?);
        let resolver = Resolver::new(Arc::clone(&client), cache, self.config.base_url.clone());

        let ctx = RunContext {
            client,
            resolver,
            unposted,
            events: self.events.clone(),
            base_url: self.config.base_url.clone(),
            include_unposted: options.include_unposted,
            today: Utc::now().date_naive(),
        };

        let (outcomes, cancelled) = match options.strategy {
            ConcurrencyStrategy::Sequential => {
                run_sequential(&ctx, &input.records, options.delay_ms, cancel).await
            }
            ConcurrencyStrategy::Chunked => {
                run_chunked(&ctx, &input.records, self.config.chunk_size, cancel).await
            }
            ConcurrencyStrategy::PerItem => run_per_item(&ctx, &input.records, cancel).await,
        };

        let mut results = Vec::with_capacity(outcomes.len());
        let mut hits = Vec::new();
        let mut unposted_candidates = Vec::new();
        let mut hit_count = 0usize;
        let mut miss_count = 0usize;
        let mut failed_count = 0usize;
        let mut skipped_count = 0usize;

        for outcome in outcomes {
            match outcome.status {
                ItemStatus::Skipped => skipped_count += 1,
                ItemStatus::Miss { unposted_candidate } => {
                    miss_count += 1;
                    if unposted_candidate {
                        unposted_candidates.push(outcome.result.identifier.clone());
                    }
                }
                ItemStatus::Completed => {
                    hit_count += 1;
                    hits.push(outcome.result.identifier.clone());
                }
                ItemStatus::Failed => failed_count += 1,
            }
            results.push(outcome.result);
        }

        let output_written = write_results(&options.output_path, &results)?;
        if output_written {
            self.events.publish(ProgressEvent::info(
                OUTPUT_SCOPE,
                "result file written",
                Phase::End,
            ));
        }

        ctx.unposted
            .persist_reconciled(&hits, &unposted_candidates)?;

        tracing::info!(
            %run_id,
            hit_count,
            miss_count,
            failed_count,
            skipped_count,
            cancelled,
            "run finished"
        );

        Ok(RunReport {
            run_id,
            results,
            hit_count,
            miss_count,
            failed_count,
            skipped_count,
            output_written,
            cancelled,
        })
    }
}

async fn run_sequential(
    ctx: &RunContext,
    records: &[InputRecord],
    delay_ms: u64,
    cancel: &CancellationToken,
) -> (Vec<ItemOutcome>, bool) {
    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        if cancel.is_cancelled() {
            return (outcomes, true);
        }
        outcomes.push(process_one(ctx, record).await);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
    (outcomes, false)
}

async fn run_chunked(
    ctx: &RunContext,
    records: &[InputRecord],
    chunk_size: usize,
    cancel: &CancellationToken,
) -> (Vec<ItemOutcome>, bool) {
    let chunk_size = chunk_size.max(1);
    let groups = join_all(records.chunks(chunk_size).map(|group| async move {
        let mut outcomes = Vec::with_capacity(group.len());
        for record in group {
            if cancel.is_cancelled() {
                break;
            }
            outcomes.push(process_one(ctx, record).await);
        }
        outcomes
    }))
    .await;
    (
        groups.into_iter().flatten().collect(),
        cancel.is_cancelled(),
    )
}

async fn run_per_item(
    ctx: &RunContext,
    records: &[InputRecord],
    cancel: &CancellationToken,
) -> (Vec<ItemOutcome>, bool) {
    let outcomes = join_all(records.iter().map(|record| async move {
        if cancel.is_cancelled() {
            None
        } else {
            Some(process_one(ctx, record).await)
        }
    }))
    .await;
    (
        outcomes.into_iter().flatten().collect(),
        cancel.is_cancelled(),
    )
}

/// One identifier end-to-end. Every failure is absorbed at this boundary —
/// one bad identifier never aborts the batch.
async fn process_one(ctx: &RunContext, record: &InputRecord) -> ItemOutcome {
    if !screening::should_fetch(record, &ctx.unposted, ctx.include_unposted, ctx.today) {
        tracing::debug!(identifier = %record.identifier, "screened out");
        return ItemOutcome {
            result: ExtractionResult::new(record.identifier.as_str()),
            status: ItemStatus::Skipped,
        };
    }

    ctx.events.publish(ProgressEvent::info(
        record.identifier.as_str(),
        "retrieval started",
        Phase::Start,
    ));

    match scrape_one(ctx, record).await {
        Ok(outcome) => outcome,
        Err(error) => {
            ctx.events.publish(ProgressEvent::exception(
                record.identifier.as_str(),
                error.to_string(),
                Phase::End,
            ));
            // Partial fields gathered before the failure are discarded: a
            // failed identifier carries only defaults and never reaches
            // the output file.
            ItemOutcome {
                result: ExtractionResult::new(record.identifier.as_str()),
                status: ItemStatus::Failed,
            }
        }
    }
}

async fn scrape_one(
    ctx: &RunContext,
    record: &InputRecord,
) -> Result<ItemOutcome, ScrapeError> {
    let identifier = record.identifier.as_str();
    let mut result = ExtractionResult::new(identifier);

    let product_code = match ctx.resolver.resolve(record).await? {
        Resolution::Miss => {
            // Pre-release items are expected to be absent; only they feed
            // the unposted candidate list.
            let unposted_candidate = record
                .release_date
                .is_some_and(|release_date| release_date > ctx.today);
            ctx.events.publish(ProgressEvent::warning(
                identifier,
                "product not found",
                Phase::End,
            ));
            return Ok(ItemOutcome {
                result,
                status: ItemStatus::Miss { unposted_candidate },
            });
        }
        Resolution::Resolved { product_code, .. } => product_code,
    };

    let page = ctx
        .client
        .fetch(&urls::product_url(&ctx.base_url, &product_code))
        .await?;
    let Some(fields) = parse_product_page(&page, &ctx.base_url)? else {
        // A resolved code whose page no longer names a product: not a hit.
        ctx.events.publish(ProgressEvent::warning(
            identifier,
            "product not found",
            Phase::End,
        ));
        return Ok(ItemOutcome {
            result,
            status: ItemStatus::Miss {
                unposted_candidate: false,
            },
        });
    };

    result.is_hit = true;
    result.product_name = fields.name;
    if let Some(price) = fields.price {
        result.price = price;
    }
    if let Some(image_url) = fields.image_url {
        result.image_url = image_url;
    }
    match fields.online_stock {
        Some(label) => result.online_stock = label,
        None => result.online_stock = UNKNOWN.to_owned(),
    }

    for warning in &fields.warnings {
        if *warning == FieldWarning::SkuUnavailable {
            continue;
        }
        ctx.events.publish(ProgressEvent::warning(
            identifier,
            warning.message(),
            Phase::Processing,
        ));
    }

    let Some(sku) = fields.sku else {
        // No SKU means no store page; the warning is the terminal event
        // and the row stays a hit with default store counts.
        ctx.events.publish(ProgressEvent::warning(
            identifier,
            FieldWarning::SkuUnavailable.message(),
            Phase::End,
        ));
        return Ok(ItemOutcome {
            result,
            status: ItemStatus::Completed,
        });
    };

    let stock_page = ctx
        .client
        .fetch(&urls::store_stock_url(&ctx.base_url, &sku))
        .await?;
    let (in_stock, low_stock) = count_store_availability(&stock_page);
    result.store_stock_count = i32::try_from(in_stock).unwrap_or(i32::MAX);
    result.store_low_stock_count = i32::try_from(low_stock).unwrap_or(i32::MAX);

    ctx.events.publish(ProgressEvent::info(
        identifier,
        "information retrieved",
        Phase::End,
    ));

    Ok(ItemOutcome {
        result,
        status: ItemStatus::Completed,
    })
}
