//! URL builders for the three pages the pipeline touches.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded inside query values. Everything a query
/// delimiter could be confused with, plus whitespace.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

/// Builds the name-search URL.
///
/// The query text is split on ASCII and ideographic (U+3000) spaces —
/// product names in the legacy input files mix both — each token is
/// percent-encoded, and tokens are joined with `+`.
#[must_use]
pub fn search_url(base_url: &str, query_text: &str) -> String {
    let tokens: Vec<String> = query_text
        .split([' ', '\u{3000}'])
        .filter(|token| !token.is_empty())
        .map(|token| utf8_percent_encode(token, QUERY_VALUE).to_string())
        .collect();
    format!("{}/search?word={}", trim_base(base_url), tokens.join("+"))
}

/// Builds the product-page URL for a resolved internal product code.
#[must_use]
pub fn product_url(base_url: &str, product_code: &str) -> String {
    format!("{}/product/{}/", trim_base(base_url), product_code)
}

/// Builds the per-store availability page URL for a product SKU.
#[must_use]
pub fn store_stock_url(base_url: &str, sku: &str) -> String {
    format!(
        "{}/product/stock/?sku={}",
        trim_base(base_url),
        utf8_percent_encode(sku, QUERY_VALUE)
    )
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
