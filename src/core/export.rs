// SimLog Report - core/export.rs
//
// CSV encoding of the per-trade and per-symbol summary tables.
// Core layer: writes to any Write trait object; `path` is only used to give
// errors context.

use crate::core::model::{SymbolSummary, TradeRecord};
use crate::util::constants::{PER_TRADE_HEADER, SUMMARY_HEADER};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Write the per-trade table, one row per record in the given order.
///
/// Returns the number of data rows written.
pub fn export_per_trade_csv<W: Write>(
    records: &[TradeRecord],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = build_writer(writer);
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    csv_writer.write_record(PER_TRADE_HEADER).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.timestamp.as_str(),
                record.status.label(),
                record.symbol.as_str(),
                &format_float(record.pnl_usd),
                &format_float(record.capital_usd),
                &record.trade_index.to_string(),
                &record.total_trades.to_string(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Write the summary table, one row per symbol in the given order.
///
/// Returns the number of data rows written.
pub fn export_summary_csv<W: Write>(
    summaries: &[SymbolSummary],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = build_writer(writer);
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    csv_writer.write_record(SUMMARY_HEADER).map_err(csv_err)?;

    let mut count = 0;
    for s in summaries {
        csv_writer
            .write_record([
                s.symbol.as_str(),
                &s.hits.to_string(),
                &s.misses.to_string(),
                &s.total.to_string(),
                &format_float(s.win_rate_pct),
                &format_float(s.avg_pnl_usd),
                &format_float(s.sum_pnl_usd),
                &format_float(s.max_pnl_usd),
                &format_float(s.min_pnl_usd),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Minimal quoting, `\n` after every row.
fn build_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Shortest round-trip text for a float, in the form analysts' tooling
/// already expects from these reports: `12.5`, `-5.0`, `1e+16`, `1.5e-05`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug already switches to exponent form outside [1e-4, 1e16).
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => text,
    }
}
