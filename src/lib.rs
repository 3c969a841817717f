//! `inflation-board` library crate.
//!
//! The binary (`infl`) is a thin wrapper around this library so that:
//!
//! - the pipeline (fetch, normalize, accumulate) is testable without
//!   spawning processes or touching the network
//! - every front-end (TUI, SVG, ASCII, exports) draws from the same run

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
