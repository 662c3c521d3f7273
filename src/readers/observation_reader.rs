use crate::error::{ProcessingError, Result};
use crate::models::{Measure, Observation};
use crate::utils::constants::{
    COLUMN_DATE, COLUMN_QC_FLAG, DATE_FORMATS, DEFAULT_BUFFER_SIZE, DEFAULT_FIELD_DELIMITER,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Positions of the required columns within a file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    date: usize,
    tmax: usize,
    tmin: usize,
    prcp: usize,
    snow: usize,
    snwd: usize,
    qc_flag: usize,
}

impl ColumnMapping {
    /// Locate every required column by name. Extra columns are ignored.
    pub fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: name.to_string(),
                    path: path.to_path_buf(),
                })
        };

        Ok(Self {
            date: find(COLUMN_DATE)?,
            tmax: find(Measure::Tmax.column_name())?,
            tmin: find(Measure::Tmin.column_name())?,
            prcp: find(Measure::Prcp.column_name())?,
            snow: find(Measure::Snow.column_name())?,
            snwd: find(Measure::Snwd.column_name())?,
            qc_flag: find(COLUMN_QC_FLAG)?,
        })
    }

    fn measure_index(&self, measure: Measure) -> usize {
        match measure {
            Measure::Tmax => self.tmax,
            Measure::Tmin => self.tmin,
            Measure::Prcp => self.prcp,
            Measure::Snow => self.snow,
            Measure::Snwd => self.snwd,
        }
    }
}

pub struct ObservationReader {
    delimiter: u8,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_FIELD_DELIMITER as u8,
            use_mmap: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read every row of a file, in file order.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let observations = if self.use_mmap {
            self.read_observations_mmap(path)?
        } else {
            self.read_observations_buffered(path)?
        };

        debug!(
            "Read {} observations from {}",
            observations.len(),
            path.display()
        );
        Ok(observations)
    }

    /// Read and concatenate several files, preserving file order then row order.
    /// Duplicate dates across files are kept as-is.
    pub fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Observation>> {
        let mut observations = Vec::new();
        for path in paths {
            observations.extend(self.read_observations(path.as_ref())?);
        }
        Ok(observations)
    }

    fn read_observations_buffered(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.read_from(reader, path)
    }

    fn read_observations_mmap(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.read_from(&mmap[..], path)
    }

    fn read_from<R: Read>(&self, source: R, path: &Path) -> Result<Vec<Observation>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let mapping = ColumnMapping::from_headers(reader.headers()?, path)?;

        let mut observations = Vec::new();
        for record in reader.records() {
            observations.push(parse_record(&record?, &mapping));
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an observation from one data row. Short rows yield missing values.
pub fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Observation {
    let date = record.get(mapping.date).and_then(parse_date);
    let qc_flag = record
        .get(mapping.qc_flag)
        .filter(|flag| !flag.is_empty())
        .map(str::to_string);

    Measure::ALL
        .iter()
        .fold(Observation::new(date), |obs, &measure| {
            let value = record
                .get(mapping.measure_index(measure))
                .and_then(parse_measure);
            obs.with_value(measure, value)
        })
        .with_qc_flag(qc_flag)
}

/// Parse a calendar date, ignoring any time-of-day suffix.
/// Unparseable text yields `None` rather than an error.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.trim().split(['T', ' ']).next()?;
    if date_part.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Empty, non-finite and non-numeric cells are treated as missing.
pub fn parse_measure(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 8, 4);

        assert_eq!(parse_date("2021-08-04"), expected);
        assert_eq!(parse_date("20210804"), expected);
        assert_eq!(parse_date("2021/08/04"), expected);
        assert_eq!(parse_date("08/04/2021"), expected);
        assert_eq!(parse_date("2021-08-04T00:00:00"), expected);
        assert_eq!(parse_date("2021-08-04 12:30:00"), expected);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2021-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure(" 95 "), Some(95.0));
        assert_eq!(parse_measure("-3.5"), Some(-3.5));
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure("NaN"), None);
        assert_eq!(parse_measure("inf"), None);
        assert_eq!(parse_measure("-Infinity"), None);
        assert_eq!(parse_measure("T"), None);
    }

    #[test]
    fn test_read_file_with_extra_and_reordered_columns() -> Result<()> {
        let file = write_file(
            "STATION,QC_FLAG,SNWD,DATE,TMIN,TMAX,PRCP,SNOW,NAME\n\
             A,,0,2020-07-01,70,95,0.1,0,Somewhere\n\
             A,X,0,2020-07-02,71,96,,0,Somewhere\n\
             A,,,bad-date,72,,0.5,,Somewhere\n",
        );

        let records = ObservationReader::new().read_observations(file.path())?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2020, 7, 1));
        assert_eq!(records[0].tmax, Some(95.0));
        assert_eq!(records[0].tmin, Some(70.0));
        assert_eq!(records[0].qc_flag, None);
        assert_eq!(records[1].qc_flag.as_deref(), Some("X"));
        assert_eq!(records[1].prcp, None);
        assert_eq!(records[2].date, None);
        assert_eq!(records[2].tmax, None);
        assert_eq!(records[2].snwd, None);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() {
        let file = write_file("DATE,TMAX,TMIN,PRCP,SNOW,QC_FLAG\n2020-01-01,1,2,3,4,\n");

        let err = ObservationReader::new()
            .read_observations(file.path())
            .unwrap_err();

        match err {
            ProcessingError::MissingColumn { column, .. } => assert_eq!(column, "SNWD"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mmap_matches_buffered() -> Result<()> {
        let file = write_file(
            "DATE;TMAX;TMIN;PRCP;SNOW;SNWD;QC_FLAG\n\
             2020-01-01;40;20;0;1;2;\n\
             2020-01-02;41;21;0;1;2;\n",
        );

        let buffered = ObservationReader::new()
            .with_delimiter(b';')
            .read_observations(file.path())?;
        let mapped = ObservationReader::new()
            .with_delimiter(b';')
            .with_mmap(true)
            .read_observations(file.path())?;

        assert_eq!(buffered.len(), 2);
        assert_eq!(buffered, mapped);
        Ok(())
    }

    #[test]
    fn test_read_all_concatenates_without_dedup() -> Result<()> {
        let contents = "DATE,TMAX,TMIN,PRCP,SNOW,SNWD,QC_FLAG\n2020-01-01,40,20,0,0,0,\n";
        let first = write_file(contents);
        let second = write_file(contents);

        let records = ObservationReader::new().read_all(&[first.path(), second.path()])?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
        Ok(())
    }
}
