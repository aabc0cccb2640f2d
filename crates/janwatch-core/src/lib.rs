pub mod app_config;
pub mod config;
pub mod input;
pub mod progress;
pub mod result;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use input::{InputError, InputRecord};
pub use progress::{Phase, ProgressEvent, Severity};
pub use result::ExtractionResult;
