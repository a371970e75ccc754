//! Destination layout: `<base>/<year>/<NN_month>/<file name>`

use crate::config::MonthNames;
use chrono::{Datelike, NaiveDateTime};
use std::path::{Path, PathBuf};

const DUTCH_MONTHS: [&str; 12] = [
    "01_januari",
    "02_februari",
    "03_maart",
    "04_april",
    "05_mei",
    "06_juni",
    "07_juli",
    "08_augustus",
    "09_september",
    "10_oktober",
    "11_november",
    "12_december",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "01_january",
    "02_february",
    "03_march",
    "04_april",
    "05_may",
    "06_june",
    "07_july",
    "08_august",
    "09_september",
    "10_october",
    "11_november",
    "12_december",
];

impl MonthNames {
    fn table(&self) -> &'static [&'static str; 12] {
        match self {
            MonthNames::Dutch => &DUTCH_MONTHS,
            MonthNames::English => &ENGLISH_MONTHS,
        }
    }
}

/// Month folder for a timestamp
pub fn month_folder(timestamp: &NaiveDateTime, names: MonthNames) -> &'static str {
    // month0() is always within 0..=11
    names.table()[timestamp.month0() as usize]
}

/// Directory a file captured at `timestamp` belongs in
pub fn destination_dir(base: &Path, timestamp: &NaiveDateTime, names: MonthNames) -> PathBuf {
    base.join(timestamp.year().to_string())
        .join(month_folder(timestamp, names))
}
