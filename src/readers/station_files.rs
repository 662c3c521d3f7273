use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DEFAULT_FILE_EXTENSION, DEFAULT_STATION_DELIMITER};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Observation files grouped by station, stations in ascending id order and
/// each station's files in ascending file-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFiles {
    stations: BTreeMap<String, Vec<PathBuf>>,
}

impl StationFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, station: &str, path: PathBuf) {
        let files = self.stations.entry(station.to_string()).or_default();
        files.push(path);
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.stations.values().map(Vec::len).sum()
    }

    pub fn get(&self, station: &str) -> Option<&[PathBuf]> {
        self.stations.get(station).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.stations
            .iter()
            .map(|(station, files)| (station.as_str(), files.as_slice()))
    }

    pub fn into_vec(self) -> Vec<(String, Vec<PathBuf>)> {
        self.stations.into_iter().collect()
    }
}

/// Scans a directory for observation files and groups them by station id.
pub struct StationFileScanner {
    extension: String,
    station_delimiter: char,
}

impl StationFileScanner {
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_FILE_EXTENSION.to_string(),
            station_delimiter: DEFAULT_STATION_DELIMITER,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_station_delimiter(mut self, delimiter: char) -> Self {
        self.station_delimiter = delimiter;
        self
    }

    /// Non-recursive scan of `dir_path`. Files without the configured
    /// extension are skipped.
    pub fn scan(&self, dir_path: &Path) -> Result<StationFiles> {
        if !dir_path.is_dir() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Path is not a directory: {}",
                dir_path.display()
            )));
        }

        let mut station_files = StationFiles::new();

        for entry in fs::read_dir(dir_path)? {
            let path = entry?.path();

            if !path.is_file() || !self.has_extension(&path) {
                continue;
            }

            match self.station_id(&path) {
                Some(station) => {
                    debug!("Found {} for station {}", path.display(), station);
                    station_files.add_file(&station, path);
                }
                None => warn!("Skipping file with unusable name: {}", path.display()),
            }
        }

        Ok(station_files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Station id is the file name up to the first delimiter, or the whole
    /// stem when the name has no delimiter.
    pub fn station_id(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        let station = stem.split(self.station_delimiter).next()?.trim();

        if station.is_empty() {
            None
        } else {
            Some(station.to_string())
        }
    }
}

impl Default for StationFileScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::TempDir;

    fn create_test_directory() -> Result<TempDir> {
        let temp_dir = TempDir::new()?;

        File::create(temp_dir.path().join("USW00094728_2021.csv"))?;
        File::create(temp_dir.path().join("USW00094728_2020.csv"))?;
        File::create(temp_dir.path().join("USC00305801_all.csv"))?;
        File::create(temp_dir.path().join("STANDALONE.csv"))?;
        File::create(temp_dir.path().join("notes.txt"))?;
        fs::create_dir(temp_dir.path().join("nested_dir.csv"))?;

        Ok(temp_dir)
    }

    #[test]
    fn test_groups_files_by_station() -> Result<()> {
        let temp_dir = create_test_directory()?;

        let files = StationFileScanner::new().scan(temp_dir.path())?;

        let stations: Vec<&str> = files.iter().map(|(s, _)| s).collect();
        assert_eq!(stations, vec!["STANDALONE", "USC00305801", "USW00094728"]);
        assert_eq!(files.file_count(), 4);

        let names: Vec<String> = files
            .get("USW00094728")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["USW00094728_2020.csv", "USW00094728_2021.csv"]);
        Ok(())
    }

    #[test]
    fn test_custom_extension_and_delimiter() -> Result<()> {
        let temp_dir = TempDir::new()?;
        File::create(temp_dir.path().join("ABC-1.txt"))?;
        File::create(temp_dir.path().join("ABC-2.TXT"))?;
        File::create(temp_dir.path().join("ABC_3.csv"))?;

        let files = StationFileScanner::new()
            .with_extension(".txt")
            .with_station_delimiter('-')
            .scan(temp_dir.path())?;

        assert_eq!(files.len(), 1);
        assert_eq!(files.get("ABC").map(<[PathBuf]>::len), Some(2));
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let files = StationFileScanner::new().scan(temp_dir.path())?;
        assert!(files.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = StationFileScanner::new().scan(Path::new("/definitely/not/here"));
        assert!(result.is_err());
    }
}
