//! Core data structures for SQM night analysis.
//!
//! Defines sensor records, the brightness sentinel, the record series and
//! the immutable results each pipeline stage hands to the next.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::constants::NO_READING_SENTINEL;

/// Sky brightness of one sample
///
/// The meter reports exactly `0.0` when it has no valid night reading
/// (daylight or saturation). That value is kept distinct from measured
/// magnitudes instead of being compared as a float downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkyBrightness {
    NoReading,
    Magnitude(f64),
}

impl SkyBrightness {
    /// Classify a raw value as reported by the meter
    pub fn from_raw(value: f64) -> Self {
        if value == NO_READING_SENTINEL {
            SkyBrightness::NoReading
        } else {
            SkyBrightness::Magnitude(value)
        }
    }

    /// Numeric value used in statistics (`0.0` for no reading)
    pub fn raw(&self) -> f64 {
        match self {
            SkyBrightness::NoReading => NO_READING_SENTINEL,
            SkyBrightness::Magnitude(value) => *value,
        }
    }

    pub fn is_reading(&self) -> bool {
        matches!(self, SkyBrightness::Magnitude(_))
    }
}

/// One parsed data line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Local date-time of the sample
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub frequency: f64,
    /// Sky brightness in magnitudes per square arcsecond
    pub brightness: SkyBrightness,
}

/// Chronologically ordered records of one night file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSeries {
    records: Vec<SensorRecord>,
    site_name: Option<String>,
}

impl RecordSeries {
    pub fn new(records: Vec<SensorRecord>, site_name: Option<String>) -> Self {
        Self { records, site_name }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SensorRecord> {
        self.records.get(index)
    }

    /// Site identifier from the file header, if one was found
    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    /// Raw brightness at an index, `None` past the end of the series
    pub fn brightness_at(&self, index: usize) -> Option<f64> {
        self.records.get(index).map(|record| record.brightness.raw())
    }

    /// Highest brightness reading in the series
    pub fn peak(&self) -> Option<PeakReading> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.brightness.is_reading())
            .fold(None, |best: Option<PeakReading>, (index, record)| {
                let brightness = record.brightness.raw();
                match best {
                    Some(current) if current.brightness >= brightness => Some(current),
                    _ => Some(PeakReading {
                        index,
                        timestamp: record.timestamp,
                        brightness,
                    }),
                }
            })
    }
}

impl Index<usize> for RecordSeries {
    type Output = SensorRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

/// Inclusive index span bounded by the first and last readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub start: usize,
    pub end: usize,
}

impl NightWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of samples in the window (0 when `start > end`)
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mean and scaled mean absolute deviation of the night readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessStats {
    pub average: f64,
    /// Mean absolute deviation divided by `modifier`
    pub offset: f64,
    pub modifier: f64,
}

impl BrightnessStats {
    /// Readings strictly above this value count as clear sky
    pub fn threshold(&self) -> f64 {
        self.average - self.offset
    }

    pub fn upper_band(&self) -> f64 {
        self.average + self.offset
    }
}

/// Tightened clear-sky span inside a night window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedWindow {
    pub inner_start: usize,
    pub inner_end: usize,
}

/// Darkest sample of the night
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakReading {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub brightness: f64,
}

/// Complete result of analyzing one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightAnalysis {
    pub site_name: Option<String>,
    pub record_count: usize,
    pub window: NightWindow,
    pub stats: BrightnessStats,
    pub refined: RefinedWindow,
    pub peak: Option<PeakReading>,
    pub night_start: NaiveDateTime,
    pub night_end: NaiveDateTime,
    pub clear_start: NaiveDateTime,
    pub clear_end: NaiveDateTime,
}

impl NightAnalysis {
    pub fn threshold(&self) -> f64 {
        self.stats.threshold()
    }

    /// Length of the clear-sky span
    pub fn clear_duration(&self) -> Duration {
        self.clear_end - self.clear_start
    }

    pub fn night_duration(&self) -> Duration {
        self.night_end - self.night_start
    }
}
