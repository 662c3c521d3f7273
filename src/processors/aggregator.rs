use crate::models::{GlobalExtreme, StationResult, StationSummary, SummaryReport};

/// Reduces per-station summaries to the global hottest and coldest days.
///
/// Each reduction is a left-to-right scan with a strict comparison, so the
/// first station seen keeps an extreme shared with later stations. Stations
/// without a value for the measure are skipped.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn hottest(&self, results: &[StationResult]) -> Option<GlobalExtreme> {
        self.scan(
            results,
            |s| s.max_temp.map(|t| (t, &s.max_dates)),
            |candidate, best| candidate > best,
        )
    }

    pub fn coldest(&self, results: &[StationResult]) -> Option<GlobalExtreme> {
        self.scan(
            results,
            |s| s.min_temp.map(|t| (t, &s.min_dates)),
            |candidate, best| candidate < best,
        )
    }

    /// Assemble the final report from results in station-processing order.
    pub fn build_report(&self, results: Vec<StationResult>) -> SummaryReport {
        let global_hottest_day = self.hottest(&results);
        let global_coldest_day = self.coldest(&results);

        SummaryReport {
            results,
            global_coldest_day,
            global_hottest_day,
        }
    }

    fn scan<'a, F, C>(
        &self,
        results: &'a [StationResult],
        extract: F,
        is_better: C,
    ) -> Option<GlobalExtreme>
    where
        F: Fn(&'a StationSummary) -> Option<(f64, &'a Vec<Option<chrono::NaiveDate>>)>,
        C: Fn(f64, f64) -> bool,
    {
        let mut best: Option<(&StationSummary, f64, &Vec<Option<chrono::NaiveDate>>)> = None;

        for summary in results.iter().map(StationResult::summary) {
            if let Some((temp, dates)) = extract(summary) {
                let replace = match best {
                    Some((_, best_temp, _)) => is_better(temp, best_temp),
                    None => true,
                };
                if replace {
                    best = Some((summary, temp, dates));
                }
            }
        }

        best.map(|(summary, temp, dates)| GlobalExtreme {
            station: summary.station.clone(),
            temp,
            dates: dates.clone(),
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
