//! Formatted terminal output.
//!
//! Formatting lives in one place so the pipeline stays free of presentation
//! and output changes stay localized.

use crate::app::pipeline::InflationRun;
use crate::chart::{CHART_SUBTITLE, CHART_TITLE};
use crate::report::{SeriesStats, recent_rows, run_stats};

/// Run summary: one block per indicator.
pub fn format_summary(run: &InflationRun) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {CHART_TITLE} | {CHART_SUBTITLE} ===\n"));
    for stats in run_stats(run) {
        out.push_str(&format_stats(&stats));
    }
    out
}

fn format_stats(s: &SeriesStats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} (SGS {})\n",
        s.indicator.display_name(),
        s.indicator.sgs_code()
    ));
    out.push_str(&format!(
        "- observations: {} | months: {} .. {}\n",
        s.n_obs,
        fmt_month(s.first_month),
        fmt_month(s.last_month)
    ));
    match s.latest {
        Some((d, v)) => out.push_str(&format!("- latest 12m: {} ({})\n", fmt_pct(v), d.format("%Y-%m"))),
        None => out.push_str("- latest 12m: n/a (fewer than 12 months)\n"),
    }
    if let (Some((dmin, vmin)), Some((dmax, vmax))) = (s.min, s.max) {
        out.push_str(&format!(
            "- range 12m : {} ({}) .. {} ({})\n",
            fmt_pct(vmin),
            dmin.format("%Y-%m"),
            fmt_pct(vmax),
            dmax.format("%Y-%m")
        ));
    }
    out
}

/// Side-by-side table of the last `n` months.
pub fn format_recent_table(run: &InflationRun, n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>10} {:>10}\n", "month", "IPCA", "IGP-M"));
    out.push_str(&format!("{:-<8} {:-<10} {:-<10}\n", "", "", ""));
    for row in recent_rows(run, n) {
        out.push_str(&format!(
            "{:<8} {:>10} {:>10}\n",
            row.date.format("%Y-%m"),
            row.ipca.map(fmt_pct).unwrap_or_else(|| "-".to_string()),
            row.igpm.map(fmt_pct).unwrap_or_else(|| "-".to_string()),
        ));
    }
    out
}

pub fn fmt_pct(v: f64) -> String {
    format!("{v:.2}%")
}

fn fmt_month(d: Option<chrono::NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "-".to_string())
}
