//! Clear-sky boundary refinement
//!
//! Tightens a night window to the innermost samples, seen from each edge,
//! that are brighter than `average - offset`. The forward and backward
//! scans share nothing but their immutable inputs and use the same strict
//! comparison; only the scan direction differs.

use tracing::debug;

use super::statistics::validate_window;
use crate::error::{Result, SqmError};
use crate::models::{BrightnessStats, NightWindow, RecordSeries, RefinedWindow};

fn exceeds(series: &RecordSeries, index: usize, threshold: f64) -> bool {
    series
        .brightness_at(index)
        .is_some_and(|brightness| brightness > threshold)
}

/// First index from `start` whose brightness exceeds `threshold`
pub(crate) fn first_crossing(
    series: &RecordSeries,
    window: NightWindow,
    threshold: f64,
) -> Option<usize> {
    (window.start..=window.end).find(|&index| exceeds(series, index, threshold))
}

/// First index from `end`, scanning back, whose brightness exceeds `threshold`
pub(crate) fn last_crossing(
    series: &RecordSeries,
    window: NightWindow,
    threshold: f64,
) -> Option<usize> {
    (window.start..=window.end)
        .rev()
        .find(|&index| exceeds(series, index, threshold))
}

/// Find the tightened clear-sky window inside `window`
pub fn refine_boundaries(
    series: &RecordSeries,
    stats: &BrightnessStats,
    window: NightWindow,
) -> Result<RefinedWindow> {
    validate_window(series, window)?;

    let threshold = stats.threshold();
    let no_crossing = || SqmError::NoCrossing {
        threshold,
        start: window.start,
        end: window.end,
    };

    let inner_start = first_crossing(series, window, threshold).ok_or_else(no_crossing)?;
    let inner_end = last_crossing(series, window, threshold).ok_or_else(no_crossing)?;

    debug!(
        "Refined window: {}..={} (threshold {:.4})",
        inner_start, inner_end, threshold
    );

    Ok(RefinedWindow {
        inner_start,
        inner_end,
    })
}
