use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    COLUMN_PRCP, COLUMN_SNOW, COLUMN_SNWD, COLUMN_TMAX, COLUMN_TMIN, HEAT_THRESHOLD,
};

/// Daily measures carried by an observation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    Tmax,
    Tmin,
    Prcp,
    Snow,
    Snwd,
}

impl Measure {
    pub const ALL: [Measure; 5] = [
        Measure::Tmax,
        Measure::Tmin,
        Measure::Prcp,
        Measure::Snow,
        Measure::Snwd,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Measure::Tmax => COLUMN_TMAX,
            Measure::Tmin => COLUMN_TMIN,
            Measure::Prcp => COLUMN_PRCP,
            Measure::Snow => COLUMN_SNOW,
            Measure::Snwd => COLUMN_SNWD,
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// One daily row as read from an observation file.
///
/// `date` is `None` when the source text could not be parsed; such rows are
/// kept and flow through sorting, heatwave detection and yearly grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: Option<NaiveDate>,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub prcp: Option<f64>,
    pub snow: Option<f64>,
    pub snwd: Option<f64>,
    pub qc_flag: Option<String>,
}

impl Observation {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            tmax: None,
            tmin: None,
            prcp: None,
            snow: None,
            snwd: None,
            qc_flag: None,
        }
    }

    pub fn with_value(mut self, measure: Measure, value: Option<f64>) -> Self {
        match measure {
            Measure::Tmax => self.tmax = value,
            Measure::Tmin => self.tmin = value,
            Measure::Prcp => self.prcp = value,
            Measure::Snow => self.snow = value,
            Measure::Snwd => self.snwd = value,
        }
        self
    }

    pub fn with_qc_flag(mut self, flag: Option<String>) -> Self {
        self.qc_flag = flag;
        self
    }

    pub fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Tmax => self.tmax,
            Measure::Tmin => self.tmin,
            Measure::Prcp => self.prcp,
            Measure::Snow => self.snow,
            Measure::Snwd => self.snwd,
        }
    }

    /// A row passes quality control when its flag is absent or blank.
    /// Whitespace-only flags count as blank, matching the trimmed reader.
    pub fn is_valid(&self) -> bool {
        self.qc_flag
            .as_deref()
            .map_or(true, |flag| flag.trim().is_empty())
    }

    /// Missing `tmax` never counts as a heat day.
    pub fn is_heat(&self) -> bool {
        self.tmax.map_or(false, |t| t >= HEAT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_flag_validity() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 15);

        assert!(Observation::new(date).is_valid());
        assert!(Observation::new(date)
            .with_qc_flag(Some(String::new()))
            .is_valid());
        assert!(Observation::new(date)
            .with_qc_flag(Some("  ".to_string()))
            .is_valid());
        assert!(!Observation::new(date)
            .with_qc_flag(Some("X".to_string()))
            .is_valid());
    }

    #[test]
    fn test_heat_threshold() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 15);

        assert!(Observation::new(date)
            .with_value(Measure::Tmax, Some(90.0))
            .is_heat());
        assert!(!Observation::new(date)
            .with_value(Measure::Tmax, Some(89.9))
            .is_heat());
        assert!(!Observation::new(date).is_heat());
    }

    #[test]
    fn test_measure_accessors() {
        let obs = Observation::new(None)
            .with_value(Measure::Prcp, Some(1.5))
            .with_value(Measure::Snwd, Some(3.0));

        assert_eq!(obs.value(Measure::Prcp), Some(1.5));
        assert_eq!(obs.value(Measure::Snwd), Some(3.0));
        assert_eq!(obs.value(Measure::Snow), None);
        assert_eq!(Measure::Snwd.column_name(), "SNWD");
        assert_eq!(Measure::ALL.len(), 5);
    }
}
