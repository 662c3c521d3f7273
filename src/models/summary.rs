use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::YearlyStats;

/// Longest qualifying run of consecutive heat days at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatwave {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub length: usize,
}

/// Headline extremes for one station.
///
/// Each `*_dates` list holds the date of every cleaned row whose value equals
/// the reported extreme exactly, in sorted row order. A `None` extreme means the
/// measure had no present values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station: String,
    pub max_temp: Option<f64>,
    pub max_dates: Vec<Option<NaiveDate>>,
    pub min_temp: Option<f64>,
    pub min_dates: Vec<Option<NaiveDate>>,
    pub wettest: Option<f64>,
    pub wettest_dates: Vec<Option<NaiveDate>>,
    pub heatwave: Option<Heatwave>,
}

impl StationSummary {
    pub fn heatwave_length(&self) -> usize {
        self.heatwave.as_ref().map_or(0, |h| h.length)
    }

    pub fn summary(&self) -> String {
        format!(
            "Station {}: Max {}, Min {}, PRCP {}, Heatwave Length {}",
            self.station,
            display_value(self.max_temp),
            display_value(self.min_temp),
            display_value(self.wettest),
            self.heatwave_length()
        )
    }
}

/// One station's analysis output: the summary plus its yearly statistics.
///
/// Serializes as a two-element array `[summary, yearly_stats]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResult(pub StationSummary, pub Vec<YearlyStats>);

impl StationResult {
    pub fn summary(&self) -> &StationSummary {
        &self.0
    }

    pub fn yearly_stats(&self) -> &[YearlyStats] {
        &self.1
    }
}

pub(crate) fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| v.to_string())
}
