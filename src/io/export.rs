//! Exports of a processed run.
//!
//! - CSV: one row per (indicator, month) of the accumulated series, easy to
//!   load in a spreadsheet
//! - JSON: the chart description, usable by any trace/layout style plotting tool

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::app::pipeline::InflationRun;
use crate::chart::ChartSpec;
use crate::domain::Indicator;
use crate::error::AppError;

/// Write the accumulated series of both indicators to a CSV file.
pub fn write_accumulated_csv(path: &Path, run: &InflationRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "indicator,sgs_code,date,accumulated_12m_pct")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for indicator in Indicator::ALL {
        for (date, value) in run.accumulated(indicator).points() {
            writeln!(
                out,
                "{},{},{},{:.6}",
                indicator.display_name(),
                indicator.sgs_code(),
                date,
                value
            )
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))?;
    tracing::info!(path = %path.display(), "accumulated series exported");
    Ok(())
}

/// Write the chart description (traces + layout) as pretty JSON.
pub fn write_chart_json(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, spec)
        .map_err(|e| AppError::io(format!("Failed to write chart JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush chart JSON: {e}")))?;
    tracing::info!(path = %path.display(), "chart description exported");
    Ok(())
}
