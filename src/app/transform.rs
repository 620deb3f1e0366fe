// SimLog Report - app/transform.rs
//
// Orchestrates one report run: read the log, parse, aggregate, encode both
// tables, then write them.
//
// All-or-nothing: the log is read and both tables are encoded in memory
// before the output directory is touched, so a missing input leaves no
// trace on disk.

use crate::core::aggregate;
use crate::core::export;
use crate::core::parser;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, Result, SimLogError};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Input and output locations for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    /// Simulation log to read.
    pub log_file: PathBuf,
    /// Directory the two tables are written into (created if absent).
    pub out_dir: PathBuf,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(constants::DEFAULT_LOG_FILE),
            out_dir: PathBuf::from(constants::DEFAULT_OUT_DIR),
        }
    }
}

impl TransformConfig {
    /// Combine CLI values with config.toml. CLI wins, then config, then
    /// the built-in defaults.
    pub fn from_sources(
        cli_log_file: Option<PathBuf>,
        cli_out_dir: Option<PathBuf>,
        config: &AppConfig,
    ) -> Self {
        let defaults = Self::default();
        Self {
            log_file: cli_log_file
                .or_else(|| config.log_file.clone())
                .unwrap_or(defaults.log_file),
            out_dir: cli_out_dir
                .or_else(|| config.out_dir.clone())
                .unwrap_or(defaults.out_dir),
        }
    }

    pub fn per_trade_path(&self) -> PathBuf {
        self.out_dir.join(constants::PER_TRADE_FILE_NAME)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.out_dir.join(constants::SUMMARY_FILE_NAME)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub per_trade_path: PathBuf,
    pub summary_path: PathBuf,
    /// Rows in the per-trade table.
    pub trade_count: usize,
    /// Rows in the summary table.
    pub symbol_count: usize,
    pub lines_processed: u64,
    pub lines_skipped: u64,
}

/// Run the full log-to-tables transformation.
pub fn run(config: &TransformConfig) -> Result<TransformOutput> {
    let started = Instant::now();

    let content = fs::read_file_lossy(&config.log_file).map_err(|e| SimLogError::Io {
        path: config.log_file.clone(),
        operation: "read log file",
        source: e,
    })?;

    let parsed = parser::parse_content(&content);
    let aggregates = aggregate::aggregate(&parsed.records);
    let summaries = aggregate::summarize(&aggregates, constants::SUMMARY_DECIMALS);

    let per_trade_path = config.per_trade_path();
    let summary_path = config.summary_path();

    let mut per_trade_buf = Vec::new();
    let trade_count =
        export::export_per_trade_csv(&parsed.records, &mut per_trade_buf, &per_trade_path)?;

    let mut summary_buf = Vec::new();
    let symbol_count = export::export_summary_csv(&summaries, &mut summary_buf, &summary_path)?;

    fs::ensure_dir(&config.out_dir).map_err(|e| SimLogError::Io {
        path: config.out_dir.clone(),
        operation: "create output directory",
        source: e,
    })?;

    write_table(&per_trade_path, &per_trade_buf)?;
    write_table(&summary_path, &summary_buf)?;

    tracing::info!(
        log = %config.log_file.display(),
        out_dir = %config.out_dir.display(),
        lines = parsed.lines_processed,
        skipped = parsed.lines_skipped,
        trades = trade_count,
        symbols = symbol_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Report written"
    );

    Ok(TransformOutput {
        per_trade_path,
        summary_path,
        trade_count,
        symbol_count,
        lines_processed: parsed.lines_processed,
        lines_skipped: parsed.lines_skipped,
    })
}

fn write_table(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write_file(path, bytes).map_err(|e| {
        SimLogError::from(ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2024/01/01 09:00:00 SIM HIT: AAPL | PnL=$12.50 | Capital=$10012.50 | Trades: 1/10
2024/01/01 09:01:00 SIM MISS: AAPL | PnL=$-5.00 | Capital=$10007.50 | Trades: 2/10
";

    #[test]
    fn test_from_sources_precedence() {
        let file_cfg = AppConfig {
            log_file: Some(PathBuf::from("cfg.log")),
            out_dir: Some(PathBuf::from("cfg_out")),
            log_level: None,
        };

        let cfg = TransformConfig::from_sources(Some(PathBuf::from("cli.log")), None, &file_cfg);
        assert_eq!(cfg.log_file, PathBuf::from("cli.log"));
        assert_eq!(cfg.out_dir, PathBuf::from("cfg_out"));

        let cfg = TransformConfig::from_sources(None, None, &AppConfig::default());
        assert_eq!(cfg, TransformConfig::default());
        assert_eq!(cfg.log_file, PathBuf::from("sim2500.log"));
        assert_eq!(cfg.per_trade_path(), PathBuf::from("data").join("sim_per_trade.csv"));
    }

    #[test]
    fn test_run_writes_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("sim.log");
        std::fs::write(&log_file, SAMPLE).unwrap();

        let config = TransformConfig {
            log_file,
            out_dir: dir.path().join("out"),
        };
        let output = run(&config).unwrap();

        assert_eq!(output.trade_count, 2);
        assert_eq!(output.symbol_count, 1);
        assert_eq!(output.lines_skipped, 0);

        let summary = std::fs::read_to_string(&output.summary_path).unwrap();
        assert!(summary.ends_with("AAPL,1,1,2,50.0,3.75,7.5,12.5,-5.0\n"));
    }

    #[test]
    fn test_missing_log_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = TransformConfig {
            log_file: dir.path().join("absent.log"),
            out_dir: dir.path().join("out"),
        };
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            SimLogError::Io {
                operation: "read log file",
                ..
            }
        ));
        assert!(!config.out_dir.exists());
    }

    #[test]
    fn test_out_dir_blocked_by_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("sim.log");
        std::fs::write(&log_file, SAMPLE).unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, "not a dir").unwrap();

        let config = TransformConfig {
            log_file,
            out_dir: blocker,
        };
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            SimLogError::Io {
                operation: "create output directory",
                ..
            }
        ));
    }
}
