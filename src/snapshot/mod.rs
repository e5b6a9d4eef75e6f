//! Snapshot generation.
//!
//! A single aggregation pass over an ordered list of file specs.

pub mod aggregator;

pub use aggregator::*;
