//! Result CSV writer.

use std::path::Path;

use janwatch_core::result::OUTPUT_HEADER;
use janwatch_core::ExtractionResult;

use crate::error::StoreError;
use crate::sjis;

/// Writes the result file: the fixed 7-column header followed by one row
/// per hit, in the order given. Returns `true` if a file was written.
///
/// When no result is a hit this is a strict no-op — the output path is not
/// opened, truncated, or created. A header-only file must never exist.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written.
pub fn write_results(path: &Path, results: &[ExtractionResult]) -> Result<bool, StoreError> {
    let hits: Vec<&ExtractionResult> = results.iter().filter(|r| r.is_hit).collect();
    if hits.is_empty() {
        return Ok(false);
    }

    let mut text = String::from(OUTPUT_HEADER);
    text.push('\n');
    for result in hits {
        text.push_str(&row(result));
        text.push('\n');
    }

    sjis::write_string(path, &text)?;
    Ok(true)
}

fn row(result: &ExtractionResult) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        result.identifier,
        result.product_name,
        result.price,
        result.online_stock,
        result.store_stock_count,
        result.store_low_stock_count,
        result.image_url
    )
}
