// SimLog Report - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the transformation and printing the output paths

use clap::Parser;
use simlog_report::app::transform::{self, TransformConfig};
use simlog_report::platform::config::{self, PlatformPaths};
use simlog_report::util;
use std::path::PathBuf;

/// SimLog Report - turn a trade-simulation log into CSV tables.
///
/// Writes a per-trade table and a per-symbol summary table, then prints
/// both file paths.
#[derive(Parser, Debug)]
#[command(name = "simlog-report", version, about)]
struct Cli {
    /// Simulation log to read [default: sim2500.log].
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Directory for the output tables [default: data].
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// config.toml to load instead of the platform default location.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so [logging] level can take effect.
    let (config_path, required) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (PlatformPaths::resolve().config_file(), false),
    };
    let loaded = config::load_config(&config_path, required);

    let level = match &loaded {
        Ok((app_config, _)) => app_config.log_level.as_deref(),
        Err(_) => None,
    };
    util::logging::init(cli.debug, level);

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SimLog Report starting"
    );

    let app_config = match loaded {
        Ok((app_config, warnings)) => {
            for warning in &warnings {
                tracing::warn!(path = %config_path.display(), "{warning}");
            }
            app_config
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let transform_config = TransformConfig::from_sources(cli.input, cli.out_dir, &app_config);

    match transform::run(&transform_config) {
        Ok(output) => {
            println!("{}", output.per_trade_path.display());
            println!("{}", output.summary_path.display());
        }
        Err(e) => {
            tracing::error!(error = %e, "Report run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
