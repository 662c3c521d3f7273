use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::summary::display_value;
use crate::models::StationResult;

/// The most extreme station-level temperature across the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalExtreme {
    pub station: String,
    pub temp: f64,
    pub dates: Vec<Option<NaiveDate>>,
}

impl std::fmt::Display for GlobalExtreme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dates: Vec<String> = self
            .dates
            .iter()
            .map(|d| d.map_or_else(|| "NaT".to_string(), |d| d.to_string()))
            .collect();
        write!(
            f,
            "station={}, temp={}, dates=[{}]",
            self.station,
            display_value(Some(self.temp)),
            dates.join(", ")
        )
    }
}

/// Combined output of a run, written once as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub results: Vec<StationResult>,
    pub global_coldest_day: Option<GlobalExtreme>,
    pub global_hottest_day: Option<GlobalExtreme>,
}

impl SummaryReport {
    pub fn station_count(&self) -> usize {
        self.results.len()
    }

    pub fn summary(&self) -> String {
        let describe = |extreme: &Option<GlobalExtreme>| {
            extreme
                .as_ref()
                .map_or_else(|| "None".to_string(), |e| e.to_string())
        };

        format!(
            "Stations: {}\n\
            Global Hottest Day(s): {}\n\
            Global Coldest Day(s): {}",
            self.station_count(),
            describe(&self.global_hottest_day),
            describe(&self.global_coldest_day)
        )
    }
}
