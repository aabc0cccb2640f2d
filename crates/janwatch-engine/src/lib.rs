//! Batch orchestration: screening, resolution, extraction, and state
//! reconciliation across a whole identifier file.

pub mod error;
pub mod events;
pub mod precompute;
pub mod resolver;
pub mod runner;
pub mod screening;

pub use error::RunError;
pub use events::ProgressSink;
pub use precompute::{run_precompute, PrecomputeReport};
pub use resolver::{Resolution, Resolver};
pub use runner::{BatchRunner, ConcurrencyStrategy, RunOptions, RunReport};
