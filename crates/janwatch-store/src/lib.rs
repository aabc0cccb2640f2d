//! Persistent state stores and fixed-encoding file I/O.
//!
//! Every file this crate touches — the identifier input file, the
//! unposted set, the product-code cache, and the result CSV — is encoded
//! as Shift_JIS, the legacy encoding the downstream tooling expects.

pub mod error;
pub mod input_file;
pub mod output;
pub mod product_code;
mod sjis;
pub mod unposted;

pub use error::StoreError;
pub use input_file::{read_input_file, InputFile, LineError};
pub use output::write_results;
pub use product_code::{cache_path_for_input, ProductCodeCache, ProductCodeEntry};
pub use unposted::UnpostedSet;
