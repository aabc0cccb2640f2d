use thiserror::Error;

use janwatch_scraper::ScrapeError;
use janwatch_store::StoreError;

/// Errors that abort a whole run. Per-identifier failures never surface
/// here — they are isolated at the worker boundary and reported as
/// Exception-severity progress events.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read identifier file: {0}")]
    Input(#[source] StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}
