//! Shared fetch -> normalize -> accumulate pipeline used by every front-end.
//!
//! The CLI commands and the TUI only differ in how they present the result.

use crate::config::Sources;
use crate::data::{BcbClient, normalize};
use crate::domain::{AccumulatedSeries, Indicator, RawObservation, Series, WINDOW_MONTHS};
use crate::error::AppError;
use crate::math::accumulate12;

/// Both indicators, normalized and accumulated.
#[derive(Debug, Clone)]
pub struct InflationRun {
    pub ipca: Series,
    pub igpm: Series,
    pub ipca_acc: AccumulatedSeries,
    pub igpm_acc: AccumulatedSeries,
}

impl InflationRun {
    pub fn series(&self, indicator: Indicator) -> &Series {
        match indicator {
            Indicator::Ipca => &self.ipca,
            Indicator::Igpm => &self.igpm,
        }
    }

    pub fn accumulated(&self, indicator: Indicator) -> &AccumulatedSeries {
        match indicator {
            Indicator::Ipca => &self.ipca_acc,
            Indicator::Igpm => &self.igpm_acc,
        }
    }
}

/// Fetch both series and process them.
///
/// A series that comes back empty-handed is a fetch failure for the whole
/// run; there is no single-series chart.
pub fn run(client: &BcbClient, sources: &Sources) -> Result<InflationRun, AppError> {
    let (ipca_raw, igpm_raw) = client.fetch_pair(sources);

    let (ipca_raw, igpm_raw) = match (ipca_raw, igpm_raw) {
        (Some(ipca), Some(igpm)) => (ipca, igpm),
        (ipca, igpm) => {
            let missing: Vec<&str> = [(Indicator::Ipca, ipca.is_none()), (Indicator::Igpm, igpm.is_none())]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(ind, _)| ind.display_name())
                .collect();
            let msg = format!("No data for {}; chart not rendered.", missing.join(", "));
            tracing::error!("{msg}");
            return Err(AppError::fetch(msg));
        }
    };

    process(&ipca_raw, &igpm_raw).inspect_err(|e| tracing::error!("processing failed: {e}"))
}

/// Normalize and accumulate both payloads.
pub fn process(ipca_raw: &[RawObservation], igpm_raw: &[RawObservation]) -> Result<InflationRun, AppError> {
    let ipca = normalize(Indicator::Ipca, ipca_raw)?;
    let igpm = normalize(Indicator::Igpm, igpm_raw)?;

    let ipca_acc = accumulate_series(&ipca);
    let igpm_acc = accumulate_series(&igpm);

    for acc in [&ipca_acc, &igpm_acc] {
        if acc.is_empty() {
            tracing::warn!(
                series = acc.indicator.display_name(),
                "fewer than {WINDOW_MONTHS} observations, nothing to accumulate"
            );
        }
    }

    Ok(InflationRun {
        ipca,
        igpm,
        ipca_acc,
        igpm_acc,
    })
}

/// Accumulate a normalized series, pairing each total with its closing date.
pub fn accumulate_series(series: &Series) -> AccumulatedSeries {
    let values = accumulate12(&series.values());
    let dates = series.dates().skip(WINDOW_MONTHS - 1).collect::<Vec<_>>();
    debug_assert_eq!(dates.len(), values.len());

    AccumulatedSeries {
        indicator: series.indicator,
        dates,
        values,
    }
}
