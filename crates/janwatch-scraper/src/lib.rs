pub mod client;
pub mod error;
pub mod extract;
pub mod search;
pub mod urls;

pub use client::PageClient;
pub use error::ScrapeError;
pub use extract::{count_store_availability, parse_product_page, FieldWarning, ProductFields};
pub use search::{parse_search_results, SearchHit};
