// SimLog Report - util/constants.rs
//
// Single source of truth for named defaults and output file names.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SimLog Report";

/// Application identifier used for the platform config directory.
pub const APP_ID: &str = "SimLogReport";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Paths
// =============================================================================

/// Simulation log read when neither the CLI nor config.toml names one.
pub const DEFAULT_LOG_FILE: &str = "sim2500.log";

/// Output directory used when neither the CLI nor config.toml names one.
pub const DEFAULT_OUT_DIR: &str = "data";

/// File name of the per-trade table inside the output directory.
pub const PER_TRADE_FILE_NAME: &str = "sim_per_trade.csv";

/// File name of the per-symbol summary table inside the output directory.
pub const SUMMARY_FILE_NAME: &str = "sim_summary_by_symbol.csv";

/// Name of the optional configuration file in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Table layout
// =============================================================================

/// Header row of the per-trade table.
pub const PER_TRADE_HEADER: [&str; 7] = [
    "timestamp",
    "status",
    "symbol",
    "pnl_usd",
    "capital_usd",
    "trade_index",
    "total_trades",
];

/// Header row of the per-symbol summary table.
pub const SUMMARY_HEADER: [&str; 9] = [
    "symbol",
    "hits",
    "misses",
    "total",
    "win_rate_pct",
    "avg_pnl_usd",
    "sum_pnl_usd",
    "max_pnl_usd",
    "min_pnl_usd",
];

/// Decimal places kept on every float in the summary table.
pub const SUMMARY_DECIMALS: usize = 2;

// =============================================================================
// Logging
// =============================================================================

/// Default tracing filter when RUST_LOG, --debug and config are all absent.
pub const DEFAULT_LOG_LEVEL: &str = "info";
