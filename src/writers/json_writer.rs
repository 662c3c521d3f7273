use crate::error::Result;
use crate::models::SummaryReport;
use crate::utils::constants::REPORT_INDENT;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize the report in memory before touching the filesystem so a
    /// failed serialization never leaves a partial file behind.
    pub fn write_report(&self, report: &SummaryReport, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(report)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        if !self.pretty {
            return Ok(serde_json::to_vec(value)?);
        }

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(REPORT_INDENT);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        Ok(buffer)
    }

    pub fn read_report(&self, path: &Path) -> Result<SummaryReport> {
        let contents = fs::read(path)?;
        Ok(serde_json::from_slice(&contents)?)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ReportFileInfo> {
        let report = self.read_report(path)?;
        let file_size = fs::metadata(path)?.len();

        Ok(ReportFileInfo {
            station_count: report.station_count(),
            yearly_records: report
                .results
                .iter()
                .map(|r| r.yearly_stats().len())
                .sum(),
            file_size,
        })
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ReportFileInfo {
    pub station_count: usize,
    pub yearly_records: usize,
    pub file_size: u64,
}

impl ReportFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Report File Summary:\n\
            - Stations: {}\n\
            - Yearly records: {}\n\
            - File size: {:.2} KB",
            self.station_count,
            self.yearly_records,
            self.file_size as f64 / 1024.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GlobalExtreme, StationResult, StationSummary, YearlyStats};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_report() -> SummaryReport {
        let date = NaiveDate::from_ymd_opt(2019, 7, 20);
        SummaryReport {
            results: vec![StationResult(
                StationSummary {
                    station: "USW00014739".to_string(),
                    max_temp: Some(98.0),
                    max_dates: vec![date],
                    min_temp: Some(2.0),
                    min_dates: vec![NaiveDate::from_ymd_opt(2019, 1, 21)],
                    wettest: None,
                    wettest_dates: Vec::new(),
                    heatwave: None,
                },
                vec![YearlyStats::new(Some(2019))],
            )],
            global_coldest_day: None,
            global_hottest_day: Some(GlobalExtreme {
                station: "USW00014739".to_string(),
                temp: 98.0,
                dates: vec![date],
            }),
        }
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("summary.json");

        let writer = JsonWriter::new();
        let report = sample_report();
        writer.write_report(&report, &path)?;

        let text = fs::read_to_string(&path)?;
        assert!(text.contains("\n    \"results\""));
        assert!(text.contains("\"2019-07-20\""));

        assert_eq!(writer.read_report(&path)?, report);

        let info = writer.get_file_info(&path)?;
        assert_eq!(info.station_count, 1);
        assert_eq!(info.yearly_records, 1);
        Ok(())
    }

    #[test]
    fn test_compact_output() -> Result<()> {
        let bytes = JsonWriter::new().with_pretty(false).to_bytes(&sample_report())?;
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains('\n'));
        Ok(())
    }
}
