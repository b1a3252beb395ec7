//! # Report Property Tests
//!
//! Property-style checks over the normalized tide report: sample ordering,
//! the presentation derivations, and serialization round-trips. These sit at
//! the binary level because they cut across the library's modules the same
//! way the application does.

use chrono::{TimeZone, Utc};
use tide_times_lib::{mock, ExtremeKind, TideReport, TideSample};

fn anchored_report() -> TideReport {
    let anchor = Utc.with_ymd_and_hms(2025, 7, 24, 0, 0, 0).unwrap();
    mock::synthetic(anchor)
}

fn sample(timestamp: f64, height_meters: f64) -> TideSample {
    TideSample {
        timestamp,
        calendar_date: "2025-07-24".to_string(),
        height_meters,
    }
}

/// The synthetic report satisfies every shape guarantee callers rely on:
/// success status, 25 strictly ordered samples, the fixed High/Low/High
/// extreme pattern.
#[test]
fn mock_report_has_expected_shape() {
    let report = anchored_report();

    assert_eq!(report.status, 200);
    assert_eq!(report.samples.len(), 25);
    for window in report.samples.windows(2) {
        assert!(
            window[0].timestamp < window[1].timestamp,
            "samples must be strictly increasing: {} then {}",
            window[0].timestamp,
            window[1].timestamp
        );
    }

    let kinds: Vec<_> = report.extremes.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ExtremeKind::High, ExtremeKind::Low, ExtremeKind::High]
    );
    for window in report.extremes.windows(2) {
        assert!(window[0].timestamp < window[1].timestamp);
    }
}

/// Two generations from the same anchor are indistinguishable, down to the
/// serialized bytes.
#[test]
fn mock_reports_are_deterministic() {
    let a = anchored_report();
    let b = anchored_report();
    assert_eq!(a, b);

    let bytes_a = serde_json::to_vec(&a).unwrap();
    let bytes_b = serde_json::to_vec(&b).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

/// Normalized heights fill the full [0, 1] band: the lowest sample maps to
/// 0, the highest to 1, everything else in between.
#[test]
fn normalized_heights_span_unit_interval() {
    let report = anchored_report();
    let normalized = report.normalized_heights();

    assert_eq!(normalized.len(), report.samples.len());
    for value in &normalized {
        assert!((0.0..=1.0).contains(value), "normalized value {value} out of band");
    }

    let min = normalized.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = normalized.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(min.abs() < 1e-12);
    assert!((max - 1.0).abs() < 1e-12);
}

/// A flat curve cannot be scaled by its range; it pins to the middle of the
/// band instead of dividing by zero.
#[test]
fn normalized_heights_handle_flat_curve() {
    let report = TideReport {
        status: 200,
        samples: vec![sample(0.0, 1.5), sample(3600.0, 1.5), sample(7200.0, 1.5)],
        extremes: vec![],
        meta: None,
    };

    assert_eq!(report.normalized_heights(), vec![0.5, 0.5, 0.5]);
}

#[test]
fn nearest_sample_is_first_at_or_after() {
    let report = TideReport {
        status: 200,
        samples: vec![sample(100.0, 1.0), sample(200.0, 2.0), sample(300.0, 1.0)],
        extremes: vec![],
        meta: None,
    };

    // Before the window: the first sample stands in
    assert_eq!(report.sample_nearest(50.0).unwrap().timestamp, 100.0);
    // Exact hit
    assert_eq!(report.sample_nearest(200.0).unwrap().timestamp, 200.0);
    // Between samples: rounds forward
    assert_eq!(report.sample_nearest(201.0).unwrap().timestamp, 300.0);
    // Past the window
    assert!(report.sample_nearest(301.0).is_none());
}

/// Reports survive a serialize/deserialize cycle unchanged, so downstream
/// consumers can ship them across process boundaries.
#[test]
fn report_serde_roundtrip() {
    let report = anchored_report();
    let json = serde_json::to_string(&report).unwrap();
    let restored: TideReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, restored);
}

/// The mock window always starts at the anchor, so the "now" lookup lands on
/// the first sample when asked at generation time.
#[test]
fn mock_now_lookup_hits_window_start() {
    let anchor = Utc.with_ymd_and_hms(2025, 7, 24, 9, 0, 0).unwrap();
    let report = mock::synthetic(anchor);
    let found = report
        .sample_nearest(anchor.timestamp() as f64)
        .expect("anchor is inside the window");
    assert_eq!(found.timestamp, anchor.timestamp() as f64);
}
