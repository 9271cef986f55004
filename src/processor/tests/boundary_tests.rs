//! Tests for boundary refinement

use super::*;
use crate::error::SqmError;
use crate::models::{BrightnessStats, NightWindow, RefinedWindow};
use crate::processor::boundary::{first_crossing, last_crossing, refine_boundaries};
use crate::processor::night_window::locate_night_window;
use crate::processor::statistics::estimate_brightness_stats;

fn stats(average: f64, offset: f64) -> BrightnessStats {
    BrightnessStats {
        average,
        offset,
        modifier: 1.25,
    }
}

#[test]
fn test_sample_night_refined_window() {
    let series = series_of(SAMPLE_NIGHT);
    let window = locate_night_window(&series).unwrap();
    let stats = estimate_brightness_stats(&series, window, 1.25).unwrap();

    let refined = refine_boundaries(&series, &stats, window).unwrap();

    assert_eq!(
        refined,
        RefinedWindow {
            inner_start: 3,
            inner_end: 5
        }
    );
    assert_eq!(series.brightness_at(refined.inner_start), Some(8.0));
    assert_eq!(series.brightness_at(refined.inner_end), Some(8.0));
}

#[test]
fn test_refined_window_nested_in_night() {
    let nights: &[&[f64]] = &[
        SAMPLE_NIGHT,
        &[0.0, 15.0, 18.0, 21.0, 21.5, 21.2, 20.0, 16.0, 0.0],
        &[0.0, 20.0, 0.0, 0.0, 21.0, 21.0, 0.0],
        &[12.0, 19.0, 19.5, 13.0],
        &[21.0],
    ];

    for values in nights {
        let series = series_of(values);
        let window = locate_night_window(&series).unwrap();
        let night_stats = estimate_brightness_stats(&series, window, 1.25).unwrap();

        if let Ok(refined) = refine_boundaries(&series, &night_stats, window) {
            assert!(window.start <= refined.inner_start, "case {:?}", values);
            assert!(refined.inner_start <= refined.inner_end, "case {:?}", values);
            assert!(refined.inner_end <= window.end, "case {:?}", values);
        }
    }
}

#[test]
fn test_flat_night_has_no_crossing() {
    let series = series_of(&[0.0, 5.0, 5.0, 5.0, 5.0, 0.0]);
    let window = locate_night_window(&series).unwrap();
    let night_stats = estimate_brightness_stats(&series, window, 1.25).unwrap();

    assert_eq!(night_stats.offset, 0.0);
    assert_eq!(night_stats.threshold(), night_stats.average);

    let error = refine_boundaries(&series, &night_stats, window).unwrap_err();
    match error {
        SqmError::NoCrossing {
            threshold,
            start,
            end,
        } => {
            assert_eq!(threshold, 5.0);
            assert_eq!((start, end), (1, 4));
        }
        other => panic!("expected NoCrossing, got {:?}", other),
    }
}

#[test]
fn test_single_sample_night_has_no_crossing() {
    let series = series_of(&[21.0]);
    let window = locate_night_window(&series).unwrap();
    let night_stats = estimate_brightness_stats(&series, window, 1.25).unwrap();

    assert!(matches!(
        refine_boundaries(&series, &night_stats, window),
        Err(SqmError::NoCrossing { .. })
    ));
}

#[test]
fn test_comparison_is_strict() {
    let series = series_of(&[6.0, 7.0, 6.0]);
    let window = NightWindow::new(0, 2);

    assert_eq!(first_crossing(&series, window, 6.0), Some(1));
    assert_eq!(last_crossing(&series, window, 6.0), Some(1));
    assert_eq!(first_crossing(&series, window, 7.0), None);
}

#[test]
fn test_scans_run_from_opposite_edges() {
    let series = series_of(&[10.0, 20.0, 10.0, 20.0, 10.0]);
    let window = NightWindow::new(0, 4);

    assert_eq!(first_crossing(&series, window, 15.0), Some(1));
    assert_eq!(last_crossing(&series, window, 15.0), Some(3));
}

#[test]
fn test_scans_stay_inside_window() {
    // Readings outside the window exceed the threshold but must be ignored
    let series = series_of(&[30.0, 10.0, 20.0, 10.0, 30.0]);
    let window = NightWindow::new(1, 3);

    let refined = refine_boundaries(&series, &stats(12.0, 0.0), window).unwrap();
    assert_eq!(
        refined,
        RefinedWindow {
            inner_start: 2,
            inner_end: 2
        }
    );
}

#[test]
fn test_out_of_bounds_window_rejected() {
    let series = series_of(&[19.0, 20.0]);
    let error = refine_boundaries(&series, &stats(19.5, 0.1), NightWindow::new(0, 5)).unwrap_err();

    assert!(matches!(error, SqmError::WindowOutOfBounds { .. }));
}

#[test]
fn test_scans_past_series_end_do_not_panic() {
    let series = series_of(&[19.0, 20.0]);
    let window = NightWindow::new(0, 5);

    assert_eq!(series.brightness_at(5), None);
    assert_eq!(first_crossing(&series, window, 30.0), None);
    assert_eq!(last_crossing(&series, window, 19.5), Some(1));
}
