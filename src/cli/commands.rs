use crate::analyzers::StationAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{GlobalExtreme, Observation, SummaryReport};
use crate::processors::Aggregator;
use crate::settings::SummaryConfig;
use crate::utils::progress::ProgressReporter;
use crate::writers::JsonWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info, Level};
use validator::Validate;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = SummaryConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            output_file,
            quiet,
        } => {
            input.apply(&mut config);
            if output_file.is_some() {
                config.output_file = output_file;
            }
            config.validate()?;

            let output_path = config.output_file();
            info!("Input directory: {}", config.input_dir()?.display());
            info!("Output file: {}", output_path.display());
            info!("Workers: {}", config.max_workers);

            let report = summarize(&config, quiet).await?;

            println!("Global Hottest Day(s)");
            println!("{}", describe_extreme(&report.global_hottest_day));
            println!("Global Coldest Day(s)");
            println!("{}", describe_extreme(&report.global_coldest_day));

            let writer = JsonWriter::new();
            writer.write_report(&report, &output_path)?;

            let file_info = writer.get_file_info(&output_path)?;
            println!("\n{}", file_info.summary());
            println!("Report written to {}", output_path.display());
        }

        Commands::Station { station, input } => {
            input.apply(&mut config);
            config.validate()?;

            let station_files = config.scanner()?.scan(config.input_dir()?)?;
            let files = station_files
                .get(&station)
                .ok_or_else(|| ProcessingError::StationNotFound {
                    station: station.clone(),
                })?;

            let analyzer = StationAnalyzer::with_reader(config.reader()?);
            let result = analyzer.analyze_files(&station, files)?;

            let bytes = JsonWriter::new().to_bytes(&result)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }

        Commands::Validate { input } => {
            input.apply(&mut config);
            config.validate()?;
            validate_inputs(&config)?;
        }

        Commands::Info { file } => {
            println!("Analyzing report file: {}", file.display());

            let writer = JsonWriter::new();
            let report = writer.read_report(&file)?;
            let file_info = writer.get_file_info(&file)?;

            println!("\n{}", report.summary());
            println!("\nFile Details:");
            println!("{}", file_info.summary());
        }
    }

    Ok(())
}

/// Scan the configured directory, analyze every station in parallel and
/// reduce the results to a report. Nothing is written here.
pub async fn summarize(config: &SummaryConfig, silent: bool) -> Result<SummaryReport> {
    let station_files = config.scanner()?.scan(config.input_dir()?)?;
    info!(
        "Found {} stations across {} files",
        station_files.len(),
        station_files.file_count()
    );

    let progress = ProgressReporter::new(
        station_files.len() as u64,
        "Analyzing stations...",
        silent,
    );

    let results = config
        .processor()?
        .process_stations(station_files, Some(progress))
        .await?;

    Ok(Aggregator::new().build_report(results))
}

fn describe_extreme(extreme: &Option<GlobalExtreme>) -> String {
    extreme
        .as_ref()
        .map_or_else(|| "None".to_string(), |e| e.to_string())
}

/// Per-station row counts gathered by the `validate` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationCounts {
    pub rows: usize,
    pub qc_rejected: usize,
    pub invalid_dates: usize,
}

impl ValidationCounts {
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self {
            rows: observations.len(),
            qc_rejected: observations.iter().filter(|o| !o.is_valid()).count(),
            invalid_dates: observations
                .iter()
                .filter(|o| o.is_valid() && o.date.is_none())
                .count(),
        }
    }
}

fn validate_inputs(config: &SummaryConfig) -> Result<()> {
    let station_files = config.scanner()?.scan(config.input_dir()?)?;
    let reader = config.reader()?;

    println!(
        "Validating {} stations across {} files...",
        station_files.len(),
        station_files.file_count()
    );

    let progress = ProgressReporter::new(station_files.len() as u64, "Validating...", false);
    let mut failures = 0usize;

    for (index, (station, files)) in station_files.iter().enumerate() {
        match reader.read_all(files) {
            Ok(observations) => {
                let counts = ValidationCounts::from_observations(&observations);
                progress.println(&format!(
                    "{}: {} rows, {} QC-rejected, {} unparseable dates",
                    station, counts.rows, counts.qc_rejected, counts.invalid_dates
                ));
            }
            Err(e) => {
                failures += 1;
                error!("Station {} failed validation: {}", station, e);
                progress.println(&format!("{}: FAILED ({})", station, e));
            }
        }
        progress.update(index as u64 + 1);
    }

    progress.finish_with_message("Validation complete");

    if failures == 0 {
        println!("✅ All stations passed validation checks");
        Ok(())
    } else {
        Err(ProcessingError::InvalidFormat(format!(
            "{} of {} stations failed validation",
            failures,
            station_files.len()
        )))
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    // A subscriber may already be installed when `run` is called more than once
    if let Err(e) = installed {
        debug!("Keeping existing log subscriber: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validation_counts() {
        let observations = vec![
            Observation::new(NaiveDate::from_ymd_opt(2020, 1, 1)),
            Observation::new(None),
            Observation::new(None).with_qc_flag(Some("S".to_string())),
        ];

        let counts = ValidationCounts::from_observations(&observations);
        assert_eq!(
            counts,
            ValidationCounts {
                rows: 3,
                qc_rejected: 1,
                invalid_dates: 1,
            }
        );
    }

    #[test]
    fn test_describe_missing_extreme() {
        assert_eq!(describe_extreme(&None), "None");
    }
}
