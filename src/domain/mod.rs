//! Domain types used throughout the pipeline.
//!
//! - the two price indices (`Indicator`)
//! - raw wire records and their normalized form (`RawObservation`, `Observation`)
//! - normalized and accumulated series (`Series`, `AccumulatedSeries`)

pub mod types;

pub use types::*;
