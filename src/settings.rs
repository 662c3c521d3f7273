use crate::error::{ProcessingError, Result};
use crate::processors::ParallelProcessor;
use crate::readers::{ObservationReader, StationFileScanner};
use crate::utils::constants::{
    DEFAULT_FIELD_DELIMITER, DEFAULT_FILE_EXTENSION, DEFAULT_STATION_DELIMITER, ENV_PREFIX,
};
use crate::utils::filename::generate_default_report_filename;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Run settings, layered as defaults -> config file -> environment -> CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SummaryConfig {
    pub input_dir: Option<PathBuf>,

    pub output_file: Option<PathBuf>,

    #[validate(range(min = 1))]
    pub max_workers: usize,

    #[validate(length(min = 1))]
    pub extension: String,

    #[validate(length(equal = 1))]
    pub station_delimiter: String,

    #[validate(length(equal = 1))]
    pub field_delimiter: String,

    pub use_mmap: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_file: None,
            max_workers: num_cpus::get(),
            extension: DEFAULT_FILE_EXTENSION.to_string(),
            station_delimiter: DEFAULT_STATION_DELIMITER.to_string(),
            field_delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
            use_mmap: false,
        }
    }
}

impl SummaryConfig {
    /// Load defaults, then the optional TOML/YAML/JSON file, then
    /// `CLIMATE_SUMMARY_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("max_workers", defaults.max_workers as i64)?
            .set_default("extension", defaults.extension)?
            .set_default("station_delimiter", defaults.station_delimiter)?
            .set_default("field_delimiter", defaults.field_delimiter)?
            .set_default("use_mmap", defaults.use_mmap)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let config: SummaryConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn input_dir(&self) -> Result<&Path> {
        self.input_dir
            .as_deref()
            .ok_or_else(|| ProcessingError::Config("No input directory configured".to_string()))
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(generate_default_report_filename)
    }

    pub fn station_delimiter(&self) -> Result<char> {
        single_char(&self.station_delimiter, "station_delimiter")
    }

    pub fn field_delimiter(&self) -> Result<u8> {
        let delimiter = single_char(&self.field_delimiter, "field_delimiter")?;
        if delimiter.is_ascii() {
            Ok(delimiter as u8)
        } else {
            Err(ProcessingError::Config(format!(
                "field_delimiter must be a single ASCII character, got '{}'",
                delimiter
            )))
        }
    }

    pub fn scanner(&self) -> Result<StationFileScanner> {
        Ok(StationFileScanner::new()
            .with_extension(&self.extension)
            .with_station_delimiter(self.station_delimiter()?))
    }

    pub fn reader(&self) -> Result<ObservationReader> {
        Ok(ObservationReader::new()
            .with_delimiter(self.field_delimiter()?)
            .with_mmap(self.use_mmap))
    }

    pub fn processor(&self) -> Result<ParallelProcessor> {
        Ok(ParallelProcessor::new(self.max_workers)
            .with_field_delimiter(self.field_delimiter()?)
            .with_mmap(self.use_mmap))
    }
}

fn single_char(value: &str, name: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ProcessingError::Config(format!(
            "{} must be a single character, got '{}'",
            name, value
        ))),
    }
}
