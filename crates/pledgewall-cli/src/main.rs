//! Pledgewall Command-Line Front End
//!
//! Takes pledges, renders the public wall and shows impact statistics from a
//! local sled-backed store.

mod commands;
mod formatter;

use clap::Parser;
use commands::{Command, CommandError, ExecOptions};
use formatter::OutputFormat;
use pledgewall_core::{PledgeStore, SledStore, StorageConfig, StoreConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Pledgewall Command-Line Front End
#[derive(Parser, Debug)]
#[command(name = "pledgewall")]
#[command(version, about = "Climate Action Pledge wall")]
pub struct Args {
    /// Path to the pledge storage directory
    #[arg(short, long, default_value = "./pledgewall_data")]
    pub data_path: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Delay before a submission is stored, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub submit_delay_ms: u64,

    /// Do not seed sample pledges into an empty wall
    #[arg(long)]
    pub no_seed: bool,

    /// Fixed seed for sample pledge generation
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pledgewall_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(data_path = %args.data_path.display(), "opening pledge store");
    let backend = SledStore::open(StorageConfig::new(&args.data_path))?;
    if backend.was_recovered() {
        tracing::debug!("store recovered from previous run");
    }

    let mut config = StoreConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_rng_seed(seed);
    }
    let store = PledgeStore::with_config(backend, config);

    let formatter = formatter::create_formatter(args.format);
    let options = ExecOptions {
        submit_delay: Duration::from_millis(args.submit_delay_ms),
        auto_seed: !args.no_seed,
    };

    let result = commands::execute(&store, args.command, &*formatter, options);
    store.backend().flush()?;

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(CommandError::Invalid(validation)) => {
            eprintln!("{}", formatter.format_validation(&validation));
            std::process::exit(2);
        }
        Err(CommandError::Store(e)) if e.is_retryable() => {
            eprintln!("{}", formatter.format_error(&format!("{}. Please try again.", e)));
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
