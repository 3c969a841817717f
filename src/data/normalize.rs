//! Raw SGS records -> date-sorted `Series`.

use chrono::NaiveDate;

use crate::domain::{Indicator, Observation, RawObservation, Series};
use crate::error::AppError;

/// Swap `DD/MM/YYYY` into `YYYY-MM-DD` by reversing the `/`-separated parts.
///
/// No validation happens here; malformed input just produces a string the
/// date parser will reject.
pub fn reorder_date(raw: &str) -> String {
    raw.trim().split('/').rev().collect::<Vec<_>>().join("-")
}

/// Parse an SGS `DD/MM/YYYY` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let iso = reorder_date(raw);
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .map_err(|e| AppError::processing(format!("Invalid SGS date '{raw}': {e}")))
}

/// Parse an SGS decimal value; `.` is the only decimal separator.
///
/// Unparseable values become NaN so they flow through accumulation instead of
/// aborting the run.
pub fn parse_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(value = raw, "unparseable SGS value, using NaN");
            f64::NAN
        }
    }
}

/// Parse every record and stable-sort ascending by date.
///
/// Equal dates keep their payload order. Missing months and duplicates pass
/// through untouched.
pub fn normalize(indicator: Indicator, raw: &[RawObservation]) -> Result<Series, AppError> {
    let mut observations = raw
        .iter()
        .map(|r| {
            Ok(Observation {
                date: parse_date(&r.date)?,
                value: parse_value(&r.value),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    observations.sort_by_key(|o| o.date);

    Ok(Series {
        indicator,
        observations,
    })
}
