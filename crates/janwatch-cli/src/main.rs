use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;

use janwatch_engine::{ConcurrencyStrategy, RunOptions};

mod run;

#[derive(Debug, Parser)]
#[command(name = "janwatch")]
#[command(about = "Batch stock watcher for JAN-coded products")]
struct Cli {
    /// Print progress events as JSON lines instead of log lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every identifier in the input file and write the result CSV.
    Run {
        /// Identifier input file (Shift_JIS, comma-separated).
        #[arg(long)]
        input: PathBuf,

        /// Result CSV path.
        #[arg(long)]
        output: PathBuf,

        /// Inter-item delay in milliseconds (sequential strategy only).
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Re-check identifiers recorded as unposted.
        #[arg(long)]
        include_unposted: bool,

        /// Scheduling strategy.
        #[arg(long, value_enum, default_value_t = StrategyArg::Sequential)]
        strategy: StrategyArg,
    },

    /// Pre-resolve product codes into the cache file without scraping
    /// product pages.
    Resolve {
        /// Identifier input file (Shift_JIS, comma-separated).
        #[arg(long)]
        input: PathBuf,

        /// Inter-item delay in milliseconds.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Sequential,
    Chunked,
    Parallel,
}

impl From<StrategyArg> for ConcurrencyStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Chunked => Self::Chunked,
            StrategyArg::Parallel => Self::PerItem,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = janwatch_core::load_app_config_from_env()?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received; finishing in-flight identifiers");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Run {
            input,
            output,
            delay_ms,
            include_unposted,
            strategy,
        } => {
            let options = RunOptions {
                input_path: input,
                output_path: output,
                delay_ms,
                include_unposted,
                strategy: strategy.into(),
            };
            run::run_scrape(config, options, cli.json, cancel).await
        }
        Commands::Resolve { input, delay_ms } => {
            run::run_resolve(config, input, delay_ms, cli.json, cancel).await
        }
    }
}
