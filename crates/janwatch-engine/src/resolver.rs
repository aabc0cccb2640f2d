//! Identifier → internal product code resolution.

use std::sync::Arc;

use tokio::sync::Mutex;

use janwatch_core::InputRecord;
use janwatch_scraper::{parse_search_results, urls, PageClient, ScrapeError};
use janwatch_store::{ProductCodeCache, ProductCodeEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        product_code: String,
        /// True when the code came from the cache and no network call was
        /// made.
        from_cache: bool,
    },
    /// The name search returned no product.
    Miss,
}

/// Cache-first resolver. The cache is consulted before any network call;
/// a previously resolved identifier never triggers a search again, in this
/// run or any future one.
pub struct Resolver {
    client: Arc<PageClient>,
    // Exclusive access: the cache is not safe for concurrent mutation, and
    // `record` writes through to the cache file. The lock is never held
    // across a network await.
    cache: Mutex<ProductCodeCache>,
    base_url: String,
}

impl Resolver {
    #[must_use]
    pub fn new(client: Arc<PageClient>, cache: ProductCodeCache, base_url: String) -> Self {
        Self {
            client,
            cache: Mutex::new(cache),
            base_url,
        }
    }

    /// Resolves one record to its internal product code.
    ///
    /// On a cache miss, searches by the record's display name — or by the
    /// identifier itself for single-column input records — and takes the
    /// first listed result, trusting the site's own ranking. The resolved
    /// entry is recorded (and persisted) before returning;
    /// `is_multi_match` is set when the search had more than one result.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] when the search page cannot be fetched or
    /// parsed. Cache-persistence failures are logged, not propagated — the
    /// resolution itself is still valid.
    pub async fn resolve(&self, record: &InputRecord) -> Result<Resolution, ScrapeError> {
        if let Some(entry) = self.cache.lock().await.get(&record.identifier) {
            return Ok(Resolution::Resolved {
                product_code: entry.product_code.clone(),
                from_cache: true,
            });
        }

        let query = record
            .display_name
            .as_deref()
            .unwrap_or(&record.identifier);
        let url = urls::search_url(&self.base_url, query);
        let body = self.client.fetch(&url).await?;
        let hits = parse_search_results(&body)?;

        let Some(first) = hits.first() else {
            return Ok(Resolution::Miss);
        };

        let entry = ProductCodeEntry {
            identifier: record.identifier.clone(),
            product_code: first.product_code.clone(),
            resolved_name: first.name.clone(),
            is_multi_match: hits.len() > 1,
        };
        let product_code = entry.product_code.clone();

        if let Err(error) = self.cache.lock().await.record(entry) {
            tracing::warn!(
                identifier = %record.identifier,
                error = %error,
                "failed to persist product-code cache entry"
            );
        }

        Ok(Resolution::Resolved {
            product_code,
            from_cache: false,
        })
    }
}
