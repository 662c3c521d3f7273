/// Required input column names
pub const COLUMN_DATE: &str = "DATE";
pub const COLUMN_TMAX: &str = "TMAX";
pub const COLUMN_TMIN: &str = "TMIN";
pub const COLUMN_PRCP: &str = "PRCP";
pub const COLUMN_SNOW: &str = "SNOW";
pub const COLUMN_SNWD: &str = "SNWD";
pub const COLUMN_QC_FLAG: &str = "QC_FLAG";

/// Heatwave detection
pub const HEAT_THRESHOLD: f64 = 90.0;
pub const MIN_HEATWAVE_LENGTH: usize = 3;

/// Accepted date layouts, tried in order
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Input discovery defaults
pub const DEFAULT_FILE_EXTENSION: &str = "csv";
pub const DEFAULT_STATION_DELIMITER: char = '_';
pub const DEFAULT_FIELD_DELIMITER: char = ',';

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const REPORT_INDENT: &[u8] = b"    ";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "CLIMATE_SUMMARY";
