use serde::{Deserialize, Serialize};

use crate::models::Measure;

/// Mean, median, sample standard deviation, minimum and maximum of the present
/// values of one measure. Undefined statistics are `None` and serialize as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FiveNumberSummary {
    pub fn is_undefined(&self) -> bool {
        self.mean.is_none()
            && self.median.is_none()
            && self.std.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }
}

/// Per-year statistics for every measure at one station.
///
/// `year` is `None` for the bucket of rows whose date could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStats {
    pub year: Option<i32>,
    #[serde(rename = "TMAX")]
    pub tmax: FiveNumberSummary,
    #[serde(rename = "TMIN")]
    pub tmin: FiveNumberSummary,
    #[serde(rename = "PRCP")]
    pub prcp: FiveNumberSummary,
    #[serde(rename = "SNOW")]
    pub snow: FiveNumberSummary,
    #[serde(rename = "SNWD")]
    pub snwd: FiveNumberSummary,
}

impl YearlyStats {
    pub fn new(year: Option<i32>) -> Self {
        Self {
            year,
            tmax: FiveNumberSummary::default(),
            tmin: FiveNumberSummary::default(),
            prcp: FiveNumberSummary::default(),
            snow: FiveNumberSummary::default(),
            snwd: FiveNumberSummary::default(),
        }
    }

    pub fn get(&self, measure: Measure) -> &FiveNumberSummary {
        match measure {
            Measure::Tmax => &self.tmax,
            Measure::Tmin => &self.tmin,
            Measure::Prcp => &self.prcp,
            Measure::Snow => &self.snow,
            Measure::Snwd => &self.snwd,
        }
    }

    pub fn set(&mut self, measure: Measure, stats: FiveNumberSummary) {
        match measure {
            Measure::Tmax => self.tmax = stats,
            Measure::Tmin => self.tmin = stats,
            Measure::Prcp => self.prcp = stats,
            Measure::Snow => self.snow = stats,
            Measure::Snwd => self.snwd = stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_keys() {
        let mut stats = YearlyStats::new(Some(2021));
        stats.set(
            Measure::Snow,
            FiveNumberSummary {
                mean: Some(1.0),
                median: Some(1.0),
                std: None,
                min: Some(1.0),
                max: Some(1.0),
            },
        );

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["year"], 2021);
        assert_eq!(json["SNOW"]["mean"], 1.0);
        assert!(json["SNOW"]["std"].is_null());
        assert!(json["TMAX"]["median"].is_null());
        assert!(stats.get(Measure::Tmax).is_undefined());
        assert!(!stats.get(Measure::Snow).is_undefined());
    }
}
