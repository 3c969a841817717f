//! Shared domain types.
//!
//! Everything here is transient: built per run from the fetched payloads and
//! dropped once the chart has been drawn.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trailing window length (months) for the accumulated series.
pub const WINDOW_MONTHS: usize = 12;

/// The two BCB SGS price indices compared on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Ipca,
    Igpm,
}

impl Indicator {
    pub const ALL: [Indicator; 2] = [Indicator::Ipca, Indicator::Igpm];

    /// SGS series code at the BCB open-data API.
    pub fn sgs_code(self) -> u32 {
        match self {
            Indicator::Ipca => 433,
            Indicator::Igpm => 189,
        }
    }

    /// Legend label.
    pub fn display_name(self) -> &'static str {
        match self {
            Indicator::Ipca => "IPCA",
            Indicator::Igpm => "IGP-M",
        }
    }

    /// Line color as `#rrggbb`.
    pub fn color_hex(self) -> &'static str {
        match self {
            Indicator::Ipca => "#022873",
            Indicator::Igpm => "#173FE5",
        }
    }

    /// Line color as RGB components.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            Indicator::Ipca => (0x02, 0x28, 0x73),
            Indicator::Igpm => (0x17, 0x3F, 0xE5),
        }
    }
}

/// One record as served by the SGS endpoint.
///
/// Both fields arrive as strings: `data` is `DD/MM/YYYY`, `valor` is a decimal
/// with `.` as separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "valor")]
    pub value: String,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// A normalized monthly observation (`value` is a percent change, 0.5 = 0.5%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// A normalized series, non-decreasing by date.
#[derive(Debug, Clone)]
pub struct Series {
    pub indicator: Indicator,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|o| o.date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

/// Trailing compounded totals aligned 1:1 with their closing dates.
///
/// `dates[i]` is the date of the source observation that closes window `i`,
/// i.e. the source series' dates with the first `WINDOW_MONTHS - 1` dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulatedSeries {
    pub indicator: Indicator,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl AccumulatedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        self.points().last()
    }
}
