#![allow(dead_code)]

use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use tracker_core::{
    calendar::Quarter,
    source::JsonSource,
    tracker::{ClientRecord, SpendRecord},
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn client_record(code: &str, committed: f64, rollover: Option<f64>, quarter: Option<Quarter>) -> ClientRecord {
    ClientRecord {
        code: code.into(),
        name: format!("{code} Studio"),
        committed,
        rollover,
        current_quarter: quarter,
    }
}

/// Writes the sample agency feed: ACME (Q2, over in April, rollover credit)
/// and GLOBEX (zero budget, no spend export).
pub fn write_sample_feed(root: &Path) -> JsonSource {
    let source = JsonSource::new(root);
    source
        .write_clients(&[
            client_record("ACME", 1000.0, Some(500.0), Some(Quarter::Q2)),
            client_record("GLOBEX", 0.0, None, Some(Quarter::Q2)),
        ])
        .expect("write clients");
    source
        .write_spend(
            "ACME",
            &[
                SpendRecord::new("April", 1200.0),
                SpendRecord::new("May", 250.0),
                SpendRecord::new("May", 150.0),
                SpendRecord::new("January", 999.0),
            ],
        )
        .expect("write spend");
    source
}

/// Creates a tracker home with `data/` populated by the sample feed.
pub fn sample_home() -> TempDir {
    let temp = TempDir::new().expect("create temp dir");
    write_sample_feed(&temp.path().join("data"));
    temp
}
