//! Numeric kernels: trailing compounded accumulation.

pub mod accumulate;

pub use accumulate::*;
