use std::path::PathBuf;

/// Ambient configuration shared by every run.
///
/// Per-run settings (input/output paths, delay, flags, strategy) are NOT
/// here — they arrive as explicit CLI arguments. This struct only carries
/// the environment-level knobs: which site to talk to and how.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin of the target site, e.g. `https://shop.example.co.jp`.
    pub base_url: String,
    /// Per-request timeout ceiling in seconds.
    pub request_timeout_secs: u64,
    /// Fixed identifying user agent sent on every request.
    pub user_agent: String,
    /// Path of the persisted unposted-set file.
    pub unposted_path: PathBuf,
    /// Group size for the chunked concurrency strategy.
    pub chunk_size: usize,
}
