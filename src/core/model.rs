// SimLog Report - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary between parsing, aggregation
// and export.

use std::fmt;

// =============================================================================
// Trade record (normalised output of parsing)
// =============================================================================

/// One simulated trade outcome extracted from a single log line.
///
/// Created by the parser, never mutated afterwards. The aggregator and the
/// per-trade table both read it.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Raw `YYYY/MM/DD HH:MM:SS` text as it appeared in the log.
    pub timestamp: String,

    /// Outcome of the trade attempt.
    pub status: TradeStatus,

    /// Ticker identifier, trimmed. Case-sensitive.
    pub symbol: String,

    /// Profit and loss in USD. May be negative.
    pub pnl_usd: f64,

    /// Capital after the trade in USD.
    pub capital_usd: f64,

    /// Position of this trade within the run.
    pub trade_index: u64,

    /// Number of trades planned for the run.
    pub total_trades: u64,

    /// 1-based line in the source log. Diagnostics only, never exported.
    pub line_number: u64,
}

// =============================================================================
// Trade status
// =============================================================================

/// Outcome tag of a simulated trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStatus {
    Hit,
    Miss,
}

impl TradeStatus {
    /// Classify a captured marker such as `HIT:` or `MISS:`.
    ///
    /// Anything containing `HIT` is a hit; everything else is a miss.
    pub fn from_marker(marker: &str) -> Self {
        if marker.contains("HIT") {
            Self::Hit
        } else {
            Self::Miss
        }
    }

    /// Text written to the `status` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Per-symbol aggregation
// =============================================================================

/// Running totals for one symbol while records are folded in.
///
/// Derived values (win rate, average) are not stored here; see
/// [`SymbolAggregate::finalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolAggregate {
    pub count: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub sum_pnl: f64,
    pub max_pnl: f64,
    pub min_pnl: f64,
}

impl SymbolAggregate {
    /// Start an aggregate from the first record seen for a symbol.
    ///
    /// The first observation initialises both running extrema.
    pub fn new(first: &TradeRecord) -> Self {
        let mut agg = Self {
            count: 0,
            hit_count: 0,
            miss_count: 0,
            sum_pnl: 0.0,
            max_pnl: first.pnl_usd,
            min_pnl: first.pnl_usd,
        };
        agg.observe(first);
        agg
    }

    /// Fold one more record into the totals.
    pub fn observe(&mut self, record: &TradeRecord) {
        self.count += 1;
        self.sum_pnl += record.pnl_usd;
        match record.status {
            TradeStatus::Hit => self.hit_count += 1,
            TradeStatus::Miss => self.miss_count += 1,
        }
        if record.pnl_usd > self.max_pnl {
            self.max_pnl = record.pnl_usd;
        }
        if record.pnl_usd < self.min_pnl {
            self.min_pnl = record.pnl_usd;
        }
    }

    /// Percentage of hits, unrounded. 0.0 for an empty aggregate.
    pub fn win_rate_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            100.0 * self.hit_count as f64 / self.count as f64
        }
    }

    /// Mean PnL, unrounded. 0.0 for an empty aggregate.
    pub fn avg_pnl(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum_pnl / self.count as f64
        }
    }

    /// Compute the emission-time view, rounding every float to
    /// `decimals` places.
    pub fn finalize(&self, symbol: &str, decimals: usize) -> SymbolSummary {
        SymbolSummary {
            symbol: symbol.to_string(),
            hits: self.hit_count,
            misses: self.miss_count,
            total: self.count,
            win_rate_pct: round_to(self.win_rate_pct(), decimals),
            avg_pnl_usd: round_to(self.avg_pnl(), decimals),
            sum_pnl_usd: round_to(self.sum_pnl, decimals),
            max_pnl_usd: round_to(self.max_pnl, decimals),
            min_pnl_usd: round_to(self.min_pnl, decimals),
        }
    }
}

/// One row of the summary table, already rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSummary {
    pub symbol: String,
    pub hits: u64,
    pub misses: u64,
    pub total: u64,
    pub win_rate_pct: f64,
    pub avg_pnl_usd: f64,
    pub sum_pnl_usd: f64,
    pub max_pnl_usd: f64,
    pub min_pnl_usd: f64,
}

/// Round `value` to `decimals` places, correctly rounded from its exact
/// binary value.
///
/// `{:.N}` formatting works on the exact decimal expansion of the float, so
/// going through it avoids the drift of `(x * 100.0).round() / 100.0`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, status: TradeStatus, pnl: f64) -> TradeRecord {
        TradeRecord {
            timestamp: "2024/01/01 09:00:00".to_string(),
            status,
            symbol: symbol.to_string(),
            pnl_usd: pnl,
            capital_usd: 10_000.0,
            trade_index: 1,
            total_trades: 10,
            line_number: 1,
        }
    }

    #[test]
    fn test_status_from_marker() {
        assert_eq!(TradeStatus::from_marker("HIT:"), TradeStatus::Hit);
        assert_eq!(TradeStatus::from_marker("MISS:"), TradeStatus::Miss);
        // Only the substring matters.
        assert_eq!(TradeStatus::from_marker("XHITX"), TradeStatus::Hit);
        assert_eq!(TradeStatus::from_marker("other"), TradeStatus::Miss);
    }

    #[test]
    fn test_first_observation_sets_extrema() {
        let agg = SymbolAggregate::new(&record("AAPL", TradeStatus::Miss, -3.0));
        assert_eq!(agg.count, 1);
        assert_eq!(agg.max_pnl, -3.0);
        assert_eq!(agg.min_pnl, -3.0);
        assert_eq!(agg.miss_count, 1);
    }

    #[test]
    fn test_negative_only_symbol_max_is_not_zero() {
        let mut agg = SymbolAggregate::new(&record("X", TradeStatus::Miss, -7.0));
        agg.observe(&record("X", TradeStatus::Miss, -2.0));
        assert_eq!(agg.max_pnl, -2.0);
        assert_eq!(agg.min_pnl, -7.0);
    }

    #[test]
    fn test_count_equals_hits_plus_misses() {
        let mut agg = SymbolAggregate::new(&record("X", TradeStatus::Hit, 1.0));
        for i in 0..9 {
            let status = if i % 3 == 0 {
                TradeStatus::Hit
            } else {
                TradeStatus::Miss
            };
            agg.observe(&record("X", status, i as f64));
        }
        assert_eq!(agg.count, 10);
        assert_eq!(agg.count, agg.hit_count + agg.miss_count);
    }

    #[test]
    fn test_finalize_example() {
        let mut agg = SymbolAggregate::new(&record("AAPL", TradeStatus::Hit, 12.5));
        agg.observe(&record("AAPL", TradeStatus::Miss, -5.0));
        let s = agg.finalize("AAPL", 2);
        assert_eq!(s.hits, 1);
        assert_eq!(s.misses, 1);
        assert_eq!(s.total, 2);
        assert_eq!(s.win_rate_pct, 50.0);
        assert_eq!(s.avg_pnl_usd, 3.75);
        assert_eq!(s.sum_pnl_usd, 7.5);
        assert_eq!(s.max_pnl_usd, 12.5);
        assert_eq!(s.min_pnl_usd, -5.0);
    }

    #[test]
    fn test_empty_aggregate_derived_values_are_zero() {
        let agg = SymbolAggregate {
            count: 0,
            hit_count: 0,
            miss_count: 0,
            sum_pnl: 0.0,
            max_pnl: 0.0,
            min_pnl: 0.0,
        };
        assert_eq!(agg.win_rate_pct(), 0.0);
        assert_eq!(agg.avg_pnl(), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(-1.004, 2), -1.0);
        // 2.675 is stored as 2.67499999..., so it rounds down.
        assert_eq!(round_to(2.675, 2), 2.67);
    }
}
