use crate::analyzers::heatwave::find_longest_heatwave;
use crate::analyzers::statistics::{find_extreme, five_number_summary, ExtremeKind};
use crate::error::{ProcessingError, Result};
use crate::models::{Measure, Observation, StationResult, StationSummary, YearlyStats};
use crate::readers::ObservationReader;
use chrono::Datelike;
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

/// Computes one station's summary and yearly statistics.
///
/// The pipeline runs in five stages: clean, sort, extremes, heatwave and
/// yearly statistics. It shares no state between stations.
pub struct StationAnalyzer {
    reader: ObservationReader,
}

impl StationAnalyzer {
    pub fn new() -> Self {
        Self {
            reader: ObservationReader::new(),
        }
    }

    pub fn with_reader(reader: ObservationReader) -> Self {
        Self { reader }
    }

    /// Load and concatenate every file for `station`, then analyze the rows.
    pub fn analyze_files<P: AsRef<Path>>(&self, station: &str, files: &[P]) -> Result<StationResult> {
        let observations = self
            .reader
            .read_all(files)
            .map_err(|e| ProcessingError::for_station(station, e))?;

        Ok(self.analyze(station, observations))
    }

    pub fn analyze(&self, station: &str, observations: Vec<Observation>) -> StationResult {
        let rows = sort_by_date(clean(observations));

        let max = find_extreme(&rows, Measure::Tmax, ExtremeKind::Maximum);
        let min = find_extreme(&rows, Measure::Tmin, ExtremeKind::Minimum);
        let wet = find_extreme(&rows, Measure::Prcp, ExtremeKind::Maximum);

        let summary = StationSummary {
            station: station.to_string(),
            max_temp: max.value,
            max_dates: max.dates,
            min_temp: min.value,
            min_dates: min.dates,
            wettest: wet.value,
            wettest_dates: wet.dates,
            heatwave: find_longest_heatwave(&rows),
        };

        let yearly = yearly_statistics(&rows);

        info!("{}", summary.summary());

        StationResult(summary, yearly)
    }
}

impl Default for StationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop rows carrying a quality-control flag. A flag of only spaces is
/// treated as no flag.
pub fn clean(observations: Vec<Observation>) -> Vec<Observation> {
    observations.into_iter().filter(Observation::is_valid).collect()
}

/// Stable ascending sort by date; rows without a date go last.
pub fn sort_by_date(mut observations: Vec<Observation>) -> Vec<Observation> {
    observations.sort_by(|a, b| compare_dates(a.date, b.date));
    observations
}

fn compare_dates<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Group date-sorted rows by calendar year and summarize every measure.
/// Rows without a date form a final `year: None` bucket.
pub fn yearly_statistics(observations: &[Observation]) -> Vec<YearlyStats> {
    let mut groups: Vec<(Option<i32>, Vec<&Observation>)> = Vec::new();

    for obs in observations {
        let year = obs.date.map(|d| d.year());
        match groups.iter_mut().find(|(y, _)| *y == year) {
            Some((_, rows)) => rows.push(obs),
            None => groups.push((year, vec![obs])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| compare_dates(*a, *b));

    groups
        .into_iter()
        .map(|(year, rows)| {
            let mut stats = YearlyStats::new(year);
            for measure in Measure::ALL {
                stats.set(
                    measure,
                    five_number_summary(rows.iter().map(|obs| obs.value(measure))),
                );
            }
            stats
        })
        .collect()
}
