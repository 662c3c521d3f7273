pub mod observation;
pub mod report;
pub mod summary;
pub mod yearly;

pub use observation::{Measure, Observation};
pub use report::{GlobalExtreme, SummaryReport};
pub use summary::{Heatwave, StationResult, StationSummary};
pub use yearly::{FiveNumberSummary, YearlyStats};
