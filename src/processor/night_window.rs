//! Night window location
//!
//! The night is bounded by the outermost samples carrying a brightness
//! reading. No-reading samples inside those bounds do not split it.

use tracing::debug;

use crate::error::{Result, SqmError};
use crate::models::{NightWindow, RecordSeries};

/// Find the first and last indices with a brightness reading
pub fn locate_night_window(series: &RecordSeries) -> Result<NightWindow> {
    let records = series.records();

    let start = records
        .iter()
        .position(|record| record.brightness.is_reading())
        .ok_or(SqmError::NoNightData)?;

    // A reading exists at `start`, so the backward scan always stops.
    let end = records
        .iter()
        .rposition(|record| record.brightness.is_reading())
        .ok_or(SqmError::NoNightData)?;

    debug!(
        "Night window: {}..={} ({} of {} samples)",
        start,
        end,
        end - start + 1,
        records.len()
    );

    Ok(NightWindow::new(start, end))
}
