pub mod heatwave;
pub mod statistics;
pub mod station_analyzer;

pub use heatwave::{find_longest_heatwave, heat_runs, HeatRun};
pub use statistics::{find_extreme, five_number_summary, ExtremeKind, MeasureExtreme};
pub use station_analyzer::StationAnalyzer;
