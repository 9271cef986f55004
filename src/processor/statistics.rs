//! Brightness statistics over a night window
//!
//! Computes the mean brightness and the mean absolute deviation from it,
//! scaled down by a modifier. Sums use Neumaier compensation so long
//! nights of near-equal magnitudes do not lose precision. NaN and infinite
//! inputs are not filtered and propagate into the result.

use tracing::debug;

use crate::error::{Result, SqmError};
use crate::models::{BrightnessStats, NightWindow, RecordSeries};

/// Compensated running sum
#[derive(Debug, Default, Clone, Copy)]
struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Reject modifiers that are not strictly positive (NaN included)
pub fn validate_modifier(modifier: f64) -> Result<()> {
    if modifier > 0.0 {
        Ok(())
    } else {
        Err(SqmError::InvalidModifier { modifier })
    }
}

/// Check that a window is non-empty and lies inside the series
pub fn validate_window(series: &RecordSeries, window: NightWindow) -> Result<()> {
    if window.start > window.end {
        return Err(SqmError::EmptyWindow {
            start: window.start,
            end: window.end,
        });
    }
    if window.end >= series.len() {
        return Err(SqmError::WindowOutOfBounds {
            end: window.end,
            len: series.len(),
        });
    }
    Ok(())
}

/// Mean and modifier-scaled mean absolute deviation over `start..=end`
pub fn estimate_brightness_stats(
    series: &RecordSeries,
    window: NightWindow,
    modifier: f64,
) -> Result<BrightnessStats> {
    validate_modifier(modifier)?;
    validate_window(series, window)?;

    let night = &series.records()[window.start..=window.end];
    let count = night.len() as f64;

    let mut sum = NeumaierSum::default();
    for record in night {
        sum.add(record.brightness.raw());
    }
    let average = sum.total() / count;

    let mut deviation = NeumaierSum::default();
    for record in night {
        deviation.add((record.brightness.raw() - average).abs());
    }
    let mean_abs_deviation = deviation.total() / count;
    let offset = mean_abs_deviation / modifier;

    debug!(
        "Brightness stats over {} samples: average={:.4}, mad={:.4}, offset={:.4} (modifier {})",
        night.len(),
        average,
        mean_abs_deviation,
        offset,
        modifier
    );

    Ok(BrightnessStats {
        average,
        offset,
        modifier,
    })
}
