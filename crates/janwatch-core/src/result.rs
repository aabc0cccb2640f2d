//! Per-identifier scrape result.

use serde::{Deserialize, Serialize};

/// Exact header of the result CSV, in output column order.
pub const OUTPUT_HEADER: &str =
    "identifier,productName,price,onlineStock,storeStockCount,storeLowStockCount,imageUrl";

/// Sentinel for fields the page carried but hid or omitted.
pub const UNKNOWN: &str = "unknown";
/// Default online-stock label before the page is consulted.
pub const ONLINE_STOCK_DEFAULT: &str = "-";
/// Default store-availability count before the stock page is consulted.
pub const STORE_COUNT_DEFAULT: i32 = -1;

/// Everything gathered for one identifier in one run.
///
/// Created once per identifier, mutated only by the worker that owns that
/// identifier's pipeline, then frozen. `is_hit == false` means the
/// identifier produced no usable page and every other field still holds its
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub identifier: String,
    pub product_name: String,
    pub price: String,
    pub online_stock: String,
    pub store_stock_count: i32,
    pub store_low_stock_count: i32,
    pub image_url: String,
    pub is_hit: bool,
}

impl ExtractionResult {
    /// A result with every field at its documented default.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            product_name: String::new(),
            price: String::new(),
            online_stock: ONLINE_STOCK_DEFAULT.to_owned(),
            store_stock_count: STORE_COUNT_DEFAULT,
            store_low_stock_count: STORE_COUNT_DEFAULT,
            image_url: UNKNOWN.to_owned(),
            is_hit: false,
        }
    }

    /// True when every field other than the identifier is still the default.
    #[must_use]
    pub fn is_all_default(&self) -> bool {
        !self.is_hit
            && self.product_name.is_empty()
            && self.price.is_empty()
            && self.online_stock == ONLINE_STOCK_DEFAULT
            && self.store_stock_count == STORE_COUNT_DEFAULT
            && self.store_low_stock_count == STORE_COUNT_DEFAULT
            && self.image_url == UNKNOWN
    }
}
