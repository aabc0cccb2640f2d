//! Search-result-page parsing for identifier resolution.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ScrapeError;
use crate::extract::element_text;

/// Anchors inside the result list that lead to product pages.
const RESULT_LINK_SELECTOR: &str = ".search-results a.product-link";

/// Internal product code embedded in a product link path.
static PRODUCT_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/product/([^/]+)/").expect("valid regex"));

/// One entry of the search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub product_code: String,
    /// The entry's display text — recorded as the resolved name.
    pub name: String,
}

/// Parses a search result page into its product entries, in page order.
///
/// Entries whose link does not carry a `/product/<code>/` path are skipped;
/// an empty vec means the search found nothing.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidSelector`] if the selector constant fails
/// to parse.
pub fn parse_search_results(body: &str) -> Result<Vec<SearchHit>, ScrapeError> {
    let document = Html::parse_document(body);

    let selector =
        Selector::parse(RESULT_LINK_SELECTOR).map_err(|_| ScrapeError::InvalidSelector {
            selector: RESULT_LINK_SELECTOR.to_owned(),
        })?;

    let mut hits = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(captures) = PRODUCT_PATH_RE.captures(href) else {
            continue;
        };
        let Some(code) = captures.get(1) else {
            continue;
        };
        hits.push(SearchHit {
            product_code: code.as_str().to_owned(),
            name: element_text(anchor),
        });
    }
    Ok(hits)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
