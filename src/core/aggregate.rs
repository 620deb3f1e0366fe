// SimLog Report - core/aggregate.rs
//
// Per-symbol fold over parsed trade records.

use crate::core::model::{SymbolAggregate, SymbolSummary, TradeRecord};
use std::collections::BTreeMap;

/// Symbol -> running totals. Iterates in ascending symbol order.
pub type AggregateMap = BTreeMap<String, SymbolAggregate>;

/// Fold `records` in input order into one aggregate per distinct symbol.
pub fn aggregate(records: &[TradeRecord]) -> AggregateMap {
    let mut map = AggregateMap::new();
    for record in records {
        match map.get_mut(&record.symbol) {
            Some(agg) => agg.observe(record),
            None => {
                map.insert(record.symbol.clone(), SymbolAggregate::new(record));
            }
        }
    }
    tracing::debug!(symbols = map.len(), "Aggregation complete");
    map
}

/// Finalise every aggregate into a summary row, in symbol order.
pub fn summarize(map: &AggregateMap, decimals: usize) -> Vec<SymbolSummary> {
    map.iter()
        .map(|(symbol, agg)| agg.finalize(symbol, decimals))
        .collect()
}
