//! Tests for brightness statistics

use super::*;
use crate::error::SqmError;
use crate::models::NightWindow;
use crate::processor::statistics::estimate_brightness_stats;

#[test]
fn test_sample_night_statistics() {
    let series = series_of(SAMPLE_NIGHT);
    let stats = estimate_brightness_stats(&series, NightWindow::new(2, 6), 1.25).unwrap();

    assert_close(stats.average, 7.0);
    // Mean absolute deviation is 1.6 before scaling
    assert_close(stats.offset * 1.25, 1.6);
    assert_close(stats.offset, 1.28);
    assert_close(stats.threshold(), 5.72);
    assert_eq!(stats.modifier, 1.25);
}

#[test]
fn test_doubling_modifier_halves_offset() {
    let series = series_of(SAMPLE_NIGHT);
    let window = NightWindow::new(2, 6);

    let one = estimate_brightness_stats(&series, window, 1.0).unwrap();
    let two = estimate_brightness_stats(&series, window, 2.0).unwrap();

    assert_eq!(one.average, two.average);
    assert_eq!(two.offset, one.offset / 2.0);
}

#[test]
fn test_offset_non_negative_and_non_increasing() {
    let series = series_of(&[0.0, 17.2, 19.8, 21.1, 21.4, 21.3, 20.9, 18.0, 0.0]);
    let window = NightWindow::new(1, 7);

    let mut previous = f64::INFINITY;
    for modifier in [0.25, 0.5, 1.0, 1.25, 2.0, 4.0, 10.0] {
        let stats = estimate_brightness_stats(&series, window, modifier).unwrap();
        assert!(stats.offset >= 0.0);
        assert!(stats.offset <= previous, "modifier {}", modifier);
        previous = stats.offset;
    }
}

#[test]
fn test_interleaved_zero_counts_in_average() {
    let series = series_of(&[0.0, 10.0, 0.0, 20.0, 0.0]);
    let stats = estimate_brightness_stats(&series, NightWindow::new(1, 3), 1.0).unwrap();

    assert_close(stats.average, 10.0);
    assert_close(stats.offset, 20.0 / 3.0);
}

#[test]
fn test_single_sample_window() {
    let series = series_of(&[0.0, 20.5, 0.0]);
    let stats = estimate_brightness_stats(&series, NightWindow::new(1, 1), 1.25).unwrap();

    assert_eq!(stats.average, 20.5);
    assert_eq!(stats.offset, 0.0);
}

#[test]
fn test_non_positive_modifier_rejected() {
    let series = series_of(SAMPLE_NIGHT);
    let window = NightWindow::new(2, 6);

    for modifier in [0.0, -0.0, -1.25, f64::NAN] {
        let error = estimate_brightness_stats(&series, window, modifier).unwrap_err();
        assert!(
            matches!(error, SqmError::InvalidModifier { .. }),
            "modifier {}",
            modifier
        );
    }
}

#[test]
fn test_empty_window_rejected() {
    let series = series_of(SAMPLE_NIGHT);
    let error = estimate_brightness_stats(&series, NightWindow::new(5, 4), 1.25).unwrap_err();

    assert!(matches!(error, SqmError::EmptyWindow { start: 5, end: 4 }));
}

#[test]
fn test_window_past_series_end_rejected() {
    let series = series_of(&[19.0, 20.0]);
    let error = estimate_brightness_stats(&series, NightWindow::new(0, 2), 1.25).unwrap_err();

    assert!(matches!(
        error,
        SqmError::WindowOutOfBounds { end: 2, len: 2 }
    ));
}

#[test]
fn test_nan_reading_propagates() {
    let series = series_of(&[19.0, f64::NAN, 20.0]);
    let stats = estimate_brightness_stats(&series, NightWindow::new(0, 2), 1.25).unwrap();

    assert!(stats.average.is_nan());
    assert!(stats.offset.is_nan());
}
