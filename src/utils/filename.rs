use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default report filename with format: climate-summary-{YYMMDD}.json
pub fn generate_default_report_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("climate-summary-{:02}{:02}{:02}.json", year, month, day);
    PathBuf::from("output").join(filename)
}
