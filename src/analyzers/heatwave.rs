use crate::models::{Heatwave, Observation};
use crate::utils::constants::MIN_HEATWAVE_LENGTH;

/// A maximal run of rows sharing the same heat/non-heat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatRun {
    pub start: usize,
    pub len: usize,
    pub is_heat: bool,
}

impl HeatRun {
    pub fn end(&self) -> usize {
        self.start + self.len - 1
    }
}

/// Split sorted rows into maximal runs of constant `is_heat`. A new run starts
/// at the first row and wherever the state differs from the previous row.
pub fn heat_runs(observations: &[Observation]) -> Vec<HeatRun> {
    let mut runs: Vec<HeatRun> = Vec::new();

    for (index, obs) in observations.iter().enumerate() {
        let is_heat = obs.is_heat();
        match runs.last_mut() {
            Some(run) if run.is_heat == is_heat => run.len += 1,
            _ => runs.push(HeatRun {
                start: index,
                len: 1,
                is_heat,
            }),
        }
    }

    runs
}

/// Longest heat run of at least `MIN_HEATWAVE_LENGTH` rows. Only a strictly
/// longer run replaces the current best, so the earliest run wins ties.
pub fn find_longest_heatwave(observations: &[Observation]) -> Option<Heatwave> {
    let mut longest: Option<HeatRun> = None;

    for run in heat_runs(observations).into_iter().filter(|r| r.is_heat) {
        let best_len = longest.map_or(0, |r| r.len);
        if run.len >= MIN_HEATWAVE_LENGTH && run.len > best_len {
            longest = Some(run);
        }
    }

    longest.map(|run| Heatwave {
        start: observations[run.start].date,
        end: observations[run.end()].date,
        length: run.len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measure;
    use chrono::NaiveDate;

    fn series(tmax: &[Option<f64>]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        tmax.iter()
            .enumerate()
            .map(|(i, &t)| {
                Observation::new(Some(start + chrono::Duration::days(i as i64)))
                    .with_value(Measure::Tmax, t)
            })
            .collect()
    }

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2022, 6, d)
    }

    #[test]
    fn test_runs_partition_rows() {
        let rows = series(&[Some(91.0), Some(92.0), Some(80.0), None, Some(95.0)]);

        let runs = heat_runs(&rows);
        assert_eq!(
            runs,
            vec![
                HeatRun { start: 0, len: 2, is_heat: true },
                HeatRun { start: 2, len: 2, is_heat: false },
                HeatRun { start: 4, len: 1, is_heat: true },
            ]
        );
    }

    #[test]
    fn test_longest_heatwave() {
        let rows = series(&[
            Some(91.0),
            Some(92.0),
            Some(93.0),
            Some(70.0),
            Some(90.0),
            Some(90.0),
            Some(99.0),
            Some(100.0),
        ]);

        let wave = find_longest_heatwave(&rows).unwrap();
        assert_eq!(wave.start, date(5));
        assert_eq!(wave.end, date(8));
        assert_eq!(wave.length, 4);
    }

    #[test]
    fn test_tie_goes_to_earlier_run() {
        let rows = series(&[
            Some(95.0),
            Some(95.0),
            Some(95.0),
            Some(60.0),
            Some(96.0),
            Some(96.0),
            Some(96.0),
        ]);

        let wave = find_longest_heatwave(&rows).unwrap();
        assert_eq!(wave.start, date(1));
        assert_eq!(wave.end, date(3));
        assert_eq!(wave.length, 3);
    }

    #[test]
    fn test_short_runs_do_not_qualify() {
        let rows = series(&[Some(95.0), Some(95.0), None, Some(95.0), Some(95.0)]);
        assert_eq!(find_longest_heatwave(&rows), None);
        assert_eq!(find_longest_heatwave(&[]), None);
    }

    #[test]
    fn test_invalid_dates_inside_run_count() {
        let mut rows = series(&[Some(95.0), Some(95.0)]);
        rows.push(Observation::new(None).with_value(Measure::Tmax, Some(97.0)));

        let wave = find_longest_heatwave(&rows).unwrap();
        assert_eq!(wave.length, 3);
        assert_eq!(wave.start, date(1));
        assert_eq!(wave.end, None);
    }
}
