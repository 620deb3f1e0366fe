// SimLog Report - core/mod.rs
//
// Core business logic layer: parsing, aggregation, table encoding.
// Must NOT depend on: platform, app, or the filesystem directly.

pub mod aggregate;
pub mod export;
pub mod model;
pub mod parser;
