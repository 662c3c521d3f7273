pub mod observation_reader;
pub mod station_files;

pub use observation_reader::{ColumnMapping, ObservationReader};
pub use station_files::{StationFileScanner, StationFiles};
