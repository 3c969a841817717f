//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - resolves series sources
//! - runs the pipeline and hands the result to the chosen front-end

use clap::Parser;

use crate::chart::ChartSpec;
use crate::cli::{ChartArgs, Command, ExportArgs, ShowArgs, TuiArgs};
use crate::config::Sources;
use crate::data::BcbClient;
use crate::error::AppError;
use crate::logging::{self, LogTarget};

pub mod pipeline;

/// Entry point for the `infl` binary.
pub fn run() -> Result<(), AppError> {
    // `infl` and `infl --ipca-file x.json` behave like `infl tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args, &cli.log_level),
        Command::Chart(args) => {
            logging::init(&cli.log_level, LogTarget::Stderr)?;
            handle_chart(args)
        }
        Command::Show(args) => {
            logging::init(&cli.log_level, LogTarget::Stderr)?;
            handle_show(args)
        }
        Command::Export(args) => {
            logging::init(&cli.log_level, LogTarget::Stderr)?;
            handle_export(args)
        }
    }
}

fn handle_tui(args: TuiArgs, log_level: &str) -> Result<(), AppError> {
    let target = match &args.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Discard,
    };
    logging::init(log_level, target)?;
    crate::tui::run(Sources::resolve(&args.sources.overrides()))
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let run = fetch_and_process(&args.sources)?;
    let spec = ChartSpec::from_run(&run).with_size(args.width, args.height);
    crate::chart::write_svg(&args.out, &spec)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let run = fetch_and_process(&args.sources)?;

    println!("{}", crate::report::format_summary(&run));
    println!("{}", crate::report::format_recent_table(&run, args.months));

    if !args.no_plot {
        let spec = ChartSpec::from_run(&run);
        println!("{}", crate::plot::render_ascii_plot(&spec, args.width, args.height));
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.csv.is_none() && args.json.is_none() {
        return Err(AppError::config("Nothing to export: pass --csv and/or --json."));
    }

    let run = fetch_and_process(&args.sources)?;

    if let Some(path) = &args.csv {
        crate::io::write_accumulated_csv(path, &run)?;
    }
    if let Some(path) = &args.json {
        crate::io::write_chart_json(path, &ChartSpec::from_run(&run))?;
    }
    Ok(())
}

fn fetch_and_process(sources: &crate::cli::SourceArgs) -> Result<pipeline::InflationRun, AppError> {
    let sources = Sources::resolve(&sources.overrides());
    pipeline::run(&BcbClient::new(), &sources)
}

/// Rewrite argv so `infl` defaults to `infl tui`.
///
/// Rules:
/// - `infl`                          -> `infl tui`
/// - `infl --ipca-file x.json ...`   -> `infl tui --ipca-file x.json ...`
/// - `infl --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "chart" | "show" | "export");
    if is_subcommand {
        return argv;
    }

    // A leading flag means "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is and let clap report the unknown command.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(argv(&["infl"])), argv(&["infl", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["infl", "--ipca-file", "a.json"])),
            argv(&["infl", "tui", "--ipca-file", "a.json"])
        );
    }

    #[test]
    fn help_and_subcommands_pass_through() {
        for args in [
            argv(&["infl", "--help"]),
            argv(&["infl", "-V"]),
            argv(&["infl", "chart", "--out", "x.svg"]),
            argv(&["infl", "show"]),
            argv(&["infl", "bogus"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn export_without_targets_is_a_config_error() {
        let args = ExportArgs {
            sources: Default::default(),
            csv: None,
            json: None,
        };
        let err = handle_export(args).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
