//! Data acquisition and normalization.
//!
//! - `bcb`: fail-soft fetch of SGS payloads (HTTP or local file)
//! - `normalize`: parse + stable date sort

pub mod bcb;
pub mod normalize;

pub use bcb::*;
pub use normalize::*;
