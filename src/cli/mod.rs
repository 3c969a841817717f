//! Command-line parsing for the BCB inflation board.
//!
//! Argument parsing and command dispatch stay separate from the pipeline code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::SourceOverrides;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "infl",
    version,
    about = "IPCA vs IGP-M trailing 12-month inflation (BCB SGS)"
)]
pub struct Cli {
    /// Log level or filter directive (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(TuiArgs),
    /// Render the chart to an SVG file.
    Chart(ChartArgs),
    /// Print a summary and an ASCII chart.
    Show(ShowArgs),
    /// Export the accumulated series (CSV) and/or the chart description (JSON).
    Export(ExportArgs),
}

/// Where to read each series from.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// IPCA endpoint (default: BCB SGS 433, or INFL_IPCA_URL).
    #[arg(long, value_name = "URL")]
    pub ipca_url: Option<String>,

    /// IGP-M endpoint (default: BCB SGS 189, or INFL_IGPM_URL).
    #[arg(long, value_name = "URL")]
    pub igpm_url: Option<String>,

    /// Read IPCA from a saved SGS JSON payload instead of the network.
    #[arg(long, value_name = "JSON")]
    pub ipca_file: Option<PathBuf>,

    /// Read IGP-M from a saved SGS JSON payload instead of the network.
    #[arg(long, value_name = "JSON")]
    pub igpm_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn overrides(&self) -> SourceOverrides {
        SourceOverrides {
            ipca_url: self.ipca_url.clone(),
            igpm_url: self.igpm_url.clone(),
            ipca_file: self.ipca_file.clone(),
            igpm_file: self.igpm_file.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Append log output to this file (the TUI discards logs otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output SVG path.
    #[arg(short, long, default_value = "inflacao-12m.svg")]
    pub out: PathBuf,

    /// Chart width (pixels).
    #[arg(long, default_value_t = crate::chart::CHART_WIDTH)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = crate::chart::CHART_HEIGHT)]
    pub height: u32,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Months listed in the recent table.
    #[arg(long, default_value_t = 12)]
    pub months: usize,

    /// Skip the ASCII chart.
    #[arg(long)]
    pub no_plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Write accumulated series to CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the chart description (traces + layout) to JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_defaults() {
        let cli = Cli::parse_from(["infl", "chart"]);
        let Command::Chart(args) = cli.command else {
            panic!("expected chart");
        };
        assert_eq!(args.out, PathBuf::from("inflacao-12m.svg"));
        assert_eq!(args.height, 600);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn source_flags_flatten_into_every_command() {
        let cli = Cli::parse_from([
            "infl",
            "export",
            "--ipca-file",
            "ipca.json",
            "--igpm-url",
            "http://localhost/igpm",
            "--csv",
            "out.csv",
            "--log-level",
            "debug",
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        let o = args.sources.overrides();
        assert_eq!(o.ipca_file, Some(PathBuf::from("ipca.json")));
        assert_eq!(o.igpm_url.as_deref(), Some("http://localhost/igpm"));
        assert_eq!(args.csv, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.log_level, "debug");
    }
}
