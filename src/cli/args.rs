use crate::settings::SummaryConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-summary")]
#[command(about = "Per-station climate summaries from daily weather observation files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

/// Input options shared by every command that scans an observation directory.
/// Unset options fall back to the configuration file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(short, long, help = "Directory containing station observation files")]
    pub input_dir: Option<PathBuf>,

    #[arg(long, help = "Maximum worker threads [default: number of CPUs]")]
    pub max_workers: Option<usize>,

    #[arg(long, help = "Observation file extension [default: csv]")]
    pub extension: Option<String>,

    #[arg(long, help = "Character ending the station id in file names [default: _]")]
    pub station_delimiter: Option<char>,

    #[arg(long, help = "Field delimiter inside observation files [default: ,]")]
    pub field_delimiter: Option<char>,

    #[arg(long, help = "Read observation files through memory maps")]
    pub mmap: bool,
}

impl InputArgs {
    pub fn apply(&self, config: &mut SummaryConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = Some(dir.clone());
        }
        if let Some(workers) = self.max_workers {
            config.max_workers = workers;
        }
        if let Some(extension) = &self.extension {
            config.extension = extension.clone();
        }
        if let Some(delimiter) = self.station_delimiter {
            config.station_delimiter = delimiter.to_string();
        }
        if let Some(delimiter) = self.field_delimiter {
            config.field_delimiter = delimiter.to_string();
        }
        if self.mmap {
            config.use_mmap = true;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every station and write the combined JSON report
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            short,
            long,
            help = "Output report path [default: output/climate-summary-{YYMMDD}.json]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Analyze a single station and print its result as JSON
    Station {
        #[arg(short, long, help = "Station id (file name prefix)")]
        station: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Load every observation file and report row counts without writing a report
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Display information about a written report
    Info {
        #[arg(short, long)]
        file: PathBuf,
    },
}
