//! Reporting utilities: per-series statistics and formatted terminal output.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::app::pipeline::InflationRun;
use crate::domain::{AccumulatedSeries, Indicator, Series};

pub mod format;

pub use format::*;

/// Headline numbers for one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub indicator: Indicator,
    pub n_obs: usize,
    pub first_month: Option<NaiveDate>,
    pub last_month: Option<NaiveDate>,
    pub latest: Option<(NaiveDate, f64)>,
    pub min: Option<(NaiveDate, f64)>,
    pub max: Option<(NaiveDate, f64)>,
}

pub fn series_stats(series: &Series, acc: &AccumulatedSeries) -> SeriesStats {
    let finite = || acc.points().filter(|(_, v)| v.is_finite());
    SeriesStats {
        indicator: series.indicator,
        n_obs: series.len(),
        first_month: series.first_date(),
        last_month: series.last_date(),
        latest: acc.latest(),
        min: finite().min_by(|a, b| a.1.total_cmp(&b.1)),
        max: finite().max_by(|a, b| a.1.total_cmp(&b.1)),
    }
}

pub fn run_stats(run: &InflationRun) -> Vec<SeriesStats> {
    Indicator::ALL
        .iter()
        .map(|&ind| series_stats(run.series(ind), run.accumulated(ind)))
        .collect()
}

/// One month of the side-by-side table.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub date: NaiveDate,
    pub ipca: Option<f64>,
    pub igpm: Option<f64>,
}

/// The most recent `n` months where either indicator has an accumulated value,
/// newest first.
pub fn recent_rows(run: &InflationRun, n: usize) -> Vec<MonthRow> {
    let mut by_date: BTreeMap<NaiveDate, MonthRow> = BTreeMap::new();
    for (date, v) in run.ipca_acc.points() {
        by_date
            .entry(date)
            .or_insert(MonthRow { date, ipca: None, igpm: None })
            .ipca = Some(v);
    }
    for (date, v) in run.igpm_acc.points() {
        by_date
            .entry(date)
            .or_insert(MonthRow { date, ipca: None, igpm: None })
            .igpm = Some(v);
    }
    by_date.into_values().rev().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::process;
    use crate::domain::RawObservation;

    fn raw(start_year: i32, values: &[f64]) -> Vec<RawObservation> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let (y, m) = (start_year + (i / 12) as i32, i % 12 + 1);
                RawObservation::new(format!("01/{m:02}/{y}"), v.to_string())
            })
            .collect()
    }

    #[test]
    fn stats_pick_latest_min_and_max() {
        let mut ipca = vec![0.0; 14];
        ipca[0] = -1.0; // 1st window only
        ipca[1] = 0.5; // 1st and 2nd windows
        ipca[12] = 2.0; // 2nd and 3rd windows
        let run = process(&raw(2020, &ipca), &raw(2020, &[0.1; 12])).unwrap();

        let stats = run_stats(&run);
        let s = &stats[0];
        assert_eq!(s.indicator, Indicator::Ipca);
        assert_eq!(s.n_obs, 14);
        assert_eq!(s.first_month, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(s.last_month, NaiveDate::from_ymd_opt(2021, 2, 1));

        let (min_date, min_v) = s.min.unwrap();
        assert_eq!(min_date, NaiveDate::from_ymd_opt(2020, 12, 1).unwrap());
        assert!((min_v - (0.99 * 1.005 - 1.0) * 100.0).abs() < 1e-9);

        let (max_date, max_v) = s.max.unwrap();
        assert_eq!(max_date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert!((max_v - (1.005 * 1.02 - 1.0) * 100.0).abs() < 1e-9);

        assert_eq!(s.latest.unwrap().0, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
    }

    #[test]
    fn recent_rows_merge_by_month_newest_first() {
        let run = process(&raw(2020, &[0.2; 14]), &raw(2020, &[0.3; 13])).unwrap();
        let rows = recent_rows(&run, 10);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
        assert!(rows[0].ipca.is_some());
        assert!(rows[0].igpm.is_none());
        assert!(rows[2].ipca.is_some() && rows[2].igpm.is_some());

        assert_eq!(recent_rows(&run, 1).len(), 1);
    }
}
