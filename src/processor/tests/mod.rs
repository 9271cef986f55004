//! Tests for the night analysis pipeline
//!
//! Shared fixtures build SQM `.dat` text from plain brightness values so
//! each stage can be exercised on realistic input.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::RecordSeries;
use crate::processor::record_parser::parse_series;

mod boundary_tests;
mod statistics_tests;

/// Header block of an SQM-LU file; line 6 carries the site name
pub const SQM_HEADER: &str = "# Light Pollution Monitoring Data Format 1.0
# URL: http://www.darksky.org/measurements
# Number of header lines: 9
# This data is released under the following license: ODbL 1.0
# Device type: SQM-LU
# Instrument ID: SQM_Noordpolderzijl
# Data supplier: Rijksuniversiteit Groningen
# UTC Date & Time, Local Date & Time, Temperature, Counts, Frequency, MSAS
# YYYY-MM-DDTHH:mm:ss.fff;YYYY-MM-DDTHH:mm:ss.fff;Celsius;number;Hz;mag/arcsec^2";

/// Local time of the first sample
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 30)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// One data line, five minutes after the previous sample
pub fn sqm_line(index: usize, brightness: f64) -> String {
    let local = base_time() + Duration::minutes(5 * index as i64);
    let utc = local - Duration::hours(2);
    format!(
        "{};{};12.5;0;1.23;{}",
        utc.format("%Y-%m-%dT%H:%M:%S%.3f"),
        local.format("%Y-%m-%dT%H:%M:%S%.3f"),
        brightness
    )
}

/// Full file text with header and one line per brightness value
pub fn sqm_text(values: &[f64]) -> String {
    let mut lines = vec![SQM_HEADER.to_string()];
    lines.extend(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| sqm_line(index, *value)),
    );
    lines.join("\n")
}

/// Parsed series for a list of brightness values
pub fn series_of(values: &[f64]) -> RecordSeries {
    parse_series(&sqm_text(values)).unwrap()
}

/// The night used throughout: dark between two twilight edges
pub const SAMPLE_NIGHT: &[f64] = &[0.0, 0.0, 5.0, 8.0, 9.0, 8.0, 5.0, 0.0, 0.0];

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
