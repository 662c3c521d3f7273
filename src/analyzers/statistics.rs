use crate::models::{FiveNumberSummary, Measure, Observation};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremeKind {
    Maximum,
    Minimum,
}

/// An extreme value of one measure and the dates of every row attaining it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureExtreme {
    pub value: Option<f64>,
    pub dates: Vec<Option<NaiveDate>>,
}

/// Find the extreme of `measure` over present values, then collect the date
/// of every row equal to it (exact equality, row order preserved).
pub fn find_extreme(
    observations: &[Observation],
    measure: Measure,
    kind: ExtremeKind,
) -> MeasureExtreme {
    let value = observations
        .iter()
        .filter_map(|obs| obs.value(measure))
        .reduce(|best, v| match kind {
            ExtremeKind::Maximum => best.max(v),
            ExtremeKind::Minimum => best.min(v),
        });

    let dates = match value {
        Some(extreme) => observations
            .iter()
            .filter(|obs| obs.value(measure) == Some(extreme))
            .map(|obs| obs.date)
            .collect(),
        None => Vec::new(),
    };

    MeasureExtreme { value, dates }
}

/// Five-number summary of the present values. No values leaves every
/// statistic undefined; a single value leaves the sample deviation undefined.
pub fn five_number_summary<I>(values: I) -> FiveNumberSummary
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut present: Vec<f64> = values.into_iter().flatten().collect();
    if present.is_empty() {
        return FiveNumberSummary::default();
    }

    let count = present.len();
    let mean = present.iter().sum::<f64>() / count as f64;

    present.sort_by(f64::total_cmp);
    let median = if count % 2 == 0 {
        (present[count / 2 - 1] + present[count / 2]) / 2.0
    } else {
        present[count / 2]
    };

    let std = (count > 1).then(|| {
        let variance =
            present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });

    FiveNumberSummary {
        mean: Some(mean),
        median: Some(median),
        std,
        min: present.first().copied(),
        max: present.last().copied(),
    }
}
