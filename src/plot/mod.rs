//! Text-mode rendering of a `ChartSpec`.

pub mod ascii;

pub use ascii::*;
