use crate::analyzers::StationAnalyzer;
use crate::error::{ProcessingError, Result};
use crate::models::StationResult;
use crate::readers::{ObservationReader, StationFiles};
use crate::utils::constants::DEFAULT_FIELD_DELIMITER;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Runs the station analyzer across a bounded rayon pool.
#[derive(Debug, Clone)]
pub struct ParallelProcessor {
    max_workers: usize,
    field_delimiter: u8,
    use_mmap: bool,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            field_delimiter: DEFAULT_FIELD_DELIMITER as u8,
            use_mmap: false,
        }
    }

    pub fn with_field_delimiter(mut self, delimiter: u8) -> Self {
        self.field_delimiter = delimiter;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Pool size for `task_count` stations: never more threads than stations.
    pub fn worker_count(&self, task_count: usize) -> usize {
        task_count.min(self.max_workers).max(1)
    }

    fn analyzer(&self) -> StationAnalyzer {
        StationAnalyzer::with_reader(
            ObservationReader::new()
                .with_delimiter(self.field_delimiter)
                .with_mmap(self.use_mmap),
        )
    }

    /// Analyze every station off the async runtime. Results come back in the
    /// station order of `station_files`; the first failure aborts the run.
    pub async fn process_stations(
        &self,
        station_files: StationFiles,
        progress: Option<ProgressReporter>,
    ) -> Result<Vec<StationResult>> {
        let processor = self.clone();
        let tasks = station_files.into_vec();

        tokio::task::spawn_blocking(move || {
            let results = processor.process_blocking(&tasks, progress.as_ref());
            if let Some(p) = &progress {
                match &results {
                    Ok(r) => p.finish_with_message(&format!("Processed {} stations", r.len())),
                    Err(_) => p.finish_with_message("Processing failed"),
                }
            }
            results
        })
        .await?
    }

    /// Analyze stations on a dedicated pool sized by `worker_count`.
    pub fn process_blocking(
        &self,
        tasks: &[(String, Vec<PathBuf>)],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<StationResult>> {
        if tasks.is_empty() {
            debug!("No stations to process");
            return Ok(Vec::new());
        }

        let workers = self.worker_count(tasks.len());
        info!(
            "Processing {} stations with {} workers",
            tasks.len(),
            workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let analyzer = self.analyzer();
        let processed_count = AtomicUsize::new(0);

        let mut indexed: Vec<(usize, StationResult)> = pool.install(|| {
            tasks
                .par_iter()
                .enumerate()
                .map(|(index, (station, files))| {
                    let result = analyzer.analyze_files(station, files);

                    let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    result.map(|r| (index, r))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        // Map back to submission order regardless of completion order.
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, result)| result).collect())
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
