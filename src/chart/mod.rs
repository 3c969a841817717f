//! Backend-neutral chart description.
//!
//! `ChartSpec` carries everything a renderer needs: one trace per indicator
//! (x/y/name/mode/line style) plus a static layout. The SVG writer, the TUI
//! widget, and the ASCII plot all draw from the same spec.

use chrono::NaiveDate;
use serde::Serialize;

use crate::app::pipeline::InflationRun;
use crate::domain::{AccumulatedSeries, Indicator};

pub mod svg;

pub use svg::write_svg;

pub const CHART_TITLE: &str = "Inflação Acumulada em 12 Meses (%)";
pub const CHART_SUBTITLE: &str = "IPCA & IGP-M";
pub const X_AXIS_TITLE: &str = "Data";
pub const Y_AXIS_TITLE: &str = "Percentual (%)";
pub const LINE_WIDTH: u32 = 3;
pub const CHART_HEIGHT: u32 = 600;
pub const CHART_WIDTH: u32 = 1000;

/// Largest magnitude a y bound may take, so the padded span stays below `f64::MAX`.
const Y_LIMIT: f64 = f64::MAX / 4.0;
/// Padding floor relative to the largest magnitude; axis ticks need a span
/// well above one ulp.
const MIN_REL_PAD: f64 = 1e-6;
const MIN_PAD: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Closest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub name: String,
    pub mode: TraceMode,
    pub line: LineStyle,
    #[serde(skip)]
    pub indicator: Indicator,
}

impl Trace {
    pub fn from_accumulated(acc: &AccumulatedSeries) -> Self {
        Self {
            x: acc.dates.clone(),
            y: acc.values.clone(),
            name: acc.indicator.display_name().to_string(),
            mode: TraceMode::Lines,
            line: LineStyle {
                color: acc.indicator.color_hex().to_string(),
                width: LINE_WIDTH,
            },
            indicator: acc.indicator,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Maximal runs of finite points in `date_to_x` coordinates.
    ///
    /// A non-finite value breaks the line: renderers draw each run separately
    /// and leave a gap where the values are missing.
    pub fn finite_runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (d, y) in self.points() {
            if y.is_finite() {
                current.push((date_to_x(d), y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub subtitle: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub hovermode: HoverMode,
    pub showlegend: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            subtitle: CHART_SUBTITLE.to_string(),
            xaxis: Axis {
                title: X_AXIS_TITLE.to_string(),
            },
            yaxis: Axis {
                title: Y_AXIS_TITLE.to_string(),
            },
            hovermode: HoverMode::Closest,
            showlegend: true,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// The IPCA vs IGP-M comparison chart for a run.
    pub fn from_run(run: &InflationRun) -> Self {
        Self {
            traces: Indicator::ALL
                .iter()
                .map(|&ind| Trace::from_accumulated(run.accumulated(ind)))
                .collect(),
            layout: ChartLayout::default(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.layout.width = width;
        self.layout.height = height;
        self
    }

    /// Date span over all traces.
    pub fn x_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.traces.iter().filter_map(|t| t.x.first()).min()?;
        let max = self.traces.iter().filter_map(|t| t.x.last()).max()?;
        Some((*min, *max))
    }

    /// Finite value span over all traces, padded by `frac` of the span.
    ///
    /// The result is always finite with `hi - lo` representable, whatever the
    /// magnitude of the values; values beyond `Y_LIMIT` fall outside the range.
    pub fn y_bounds(&self, frac: f64) -> Option<(f64, f64)> {
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in self.traces.iter().flat_map(|t| t.y.iter()).filter(|v| v.is_finite()) {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        let lo = lo.clamp(-Y_LIMIT, Y_LIMIT);
        let hi = hi.clamp(-Y_LIMIT, Y_LIMIT);
        let magnitude = lo.abs().max(hi.abs());
        if hi <= lo {
            let pad = (magnitude * 0.05).max(1.0);
            return Some((lo - pad, hi + pad));
        }
        let pad = ((hi - lo) * frac.clamp(0.0, 0.5))
            .max(magnitude * MIN_REL_PAD)
            .max(MIN_PAD);
        Some((lo - pad, hi + pad))
    }

    /// Drawable x range in `date_to_x` units.
    ///
    /// A chart with no points still gets a frame: it falls back to the year 2000.
    pub fn x_range(&self) -> (f64, f64) {
        match self.x_bounds() {
            Some((a, b)) if b > a => (date_to_x(a), date_to_x(b)),
            Some((a, _)) => (date_to_x(a) - 15.0, date_to_x(a) + 15.0),
            None => {
                let start = NaiveDate::from_ymd_opt(2000, 1, 1).map(date_to_x).unwrap_or(0.0);
                (start, start + 366.0)
            }
        }
    }

    /// Drawable y range, padded by 5%; `(0, 1)` when there is nothing to draw.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_bounds(0.05).unwrap_or((0.0, 1.0))
    }

    pub fn has_points(&self) -> bool {
        self.traces.iter().any(|t| !t.y.is_empty())
    }
}

/// Dates as a continuous x coordinate (days from CE).
pub fn date_to_x(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

/// Inverse of `date_to_x`, formatted `YYYY-MM` for tick labels.
pub fn fmt_x_month(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::process;
    use crate::domain::RawObservation;

    fn run_with(ipca: &[f64], igpm: &[f64]) -> InflationRun {
        let raw = |values: &[f64]| {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let (y, m) = (2020 + (i / 12) as i32, i % 12 + 1);
                    RawObservation::new(format!("01/{m:02}/{y}"), v.to_string())
                })
                .collect::<Vec<_>>()
        };
        process(&raw(ipca), &raw(igpm)).unwrap()
    }

    #[test]
    fn spec_has_two_styled_traces() {
        let spec = ChartSpec::from_run(&run_with(&[0.5; 14], &[0.2; 13]));
        assert_eq!(spec.traces.len(), 2);

        let ipca = &spec.traces[0];
        assert_eq!(ipca.name, "IPCA");
        assert_eq!(ipca.line.color, "#022873");
        assert_eq!(ipca.line.width, 3);
        assert_eq!(ipca.x.len(), 3);
        assert_eq!(ipca.x[0], NaiveDate::from_ymd_opt(2020, 12, 1).unwrap());

        let igpm = &spec.traces[1];
        assert_eq!(igpm.name, "IGP-M");
        assert_eq!(igpm.line.color, "#173FE5");
        assert_eq!(igpm.y.len(), 2);

        assert!(spec.layout.showlegend);
        assert_eq!(spec.layout.height, 600);
    }

    #[test]
    fn bounds_skip_non_finite_values() {
        let mut spec = ChartSpec::from_run(&run_with(&[0.5; 13], &[0.2; 13]));
        spec.traces[0].y[0] = f64::NAN;
        let (lo, hi) = spec.y_bounds(0.0).unwrap();
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < hi);

        let (x0, x1) = spec.x_bounds().unwrap();
        assert_eq!(x0, NaiveDate::from_ymd_opt(2020, 12, 1).unwrap());
        assert_eq!(x1, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    }

    #[test]
    fn extreme_values_keep_finite_bounds() {
        let mut spec = ChartSpec::from_run(&run_with(&[0.5; 12], &[0.2; 12]));
        spec.traces[0].y[0] = -1e308;
        spec.traces[1].y[0] = 1e308;

        let (lo, hi) = spec.y_range();
        assert!(lo.is_finite() && hi.is_finite());
        assert!((hi - lo).is_finite());
        assert!(lo < 0.0 && hi > 0.0);

        spec.traces[0].y[0] = f64::MAX;
        spec.traces[1].y[0] = f64::MAX;
        let (lo, hi) = spec.y_range();
        assert!(lo < hi && (hi - lo).is_finite());
    }

    #[test]
    fn nearly_flat_values_still_get_a_visible_span() {
        let mut spec = ChartSpec::from_run(&run_with(&[0.5; 12], &[0.2; 12]));
        spec.traces[0].y[0] = 1e20;
        spec.traces[1].y[0] = 1e20 + 16384.0;
        let (lo, hi) = spec.y_bounds(0.05).unwrap();
        assert!(hi - lo >= 1e20 * 1e-6);
    }

    #[test]
    fn non_finite_values_split_a_trace_into_runs() {
        let mut spec = ChartSpec::from_run(&run_with(&[0.5; 17], &[0.2; 12]));
        let ipca = &mut spec.traces[0];
        assert_eq!(ipca.y.len(), 6);
        ipca.y[0] = f64::NAN;
        ipca.y[2] = f64::NAN;
        ipca.y[3] = f64::INFINITY;

        let runs = ipca.finite_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(date_to_x(ipca.x[1]), ipca.y[1])]);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(runs[1][0].0, date_to_x(ipca.x[4]));

        assert_eq!(spec.traces[1].finite_runs().len(), 1);
    }

    #[test]
    fn empty_traces_have_no_bounds() {
        let spec = ChartSpec::from_run(&run_with(&[0.5; 3], &[0.2; 3]));
        assert!(spec.x_bounds().is_none());
        assert!(spec.y_bounds(0.05).is_none());
    }

    #[test]
    fn x_axis_round_trips_to_month_labels() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(fmt_x_month(date_to_x(d)), "2024-03");
    }

    #[test]
    fn serializes_like_a_trace_list() {
        let spec = ChartSpec::from_run(&run_with(&[0.0; 12], &[0.0; 12]));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["traces"][0]["mode"], "lines");
        assert_eq!(json["traces"][0]["x"][0], "2020-12-01");
        assert_eq!(json["layout"]["hovermode"], "closest");
        assert_eq!(json["layout"]["xaxis"]["title"], "Data");
    }
}
