//! # Tide Times Core Library
//!
//! This library is the data layer of the Tide Times application: it fetches
//! tide height curves and high/low extremes for a coordinate from the
//! WorldTides HTTP API, validates and decodes the response, and hands callers
//! a normalized [`TideReport`] or a classified error.
//!
//! ## Structure
//!
//! - [`client`]: the [`client::TideClient`] request/validation/decode pipeline
//!   and the [`client::TideError`] taxonomy
//! - [`config`]: TOML configuration with defaults and environment overrides
//! - [`mock`]: deterministic synthetic reports for offline and demo use
//!
//! ## Data Flow
//!
//! 1. **Online**: build request target for (coordinate, today), execute,
//!    check the application status, strict-decode into a [`TideReport`]
//! 2. **Mock**: generate a sinusoidal 24-hour report anchored at "now"
//! 3. Either way the caller receives one immutable report per call; nothing
//!    is cached or persisted by this layer.
//!
//! The presentation layer consumes reports directly; the two derivations it
//! needs (a [0, 1] height scale for charting and the sample nearest "now" for
//! a live indicator) are provided as pure methods on [`TideReport`].

use serde::{Deserialize, Serialize};

// Module declarations
pub mod client;
pub mod config;
pub mod mock;

/// A geographic point the tide data is requested for.
///
/// Latitude and longitude are plain finite floats; out-of-range values are
/// the API's responsibility to reject, not ours.
///
/// # Example
/// ```
/// use tide_times_lib::Coordinate;
///
/// let sydney = Coordinate { latitude: -33.86, longitude: 151.21 };
/// assert!(sydney.latitude < 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// One point on the continuous tide curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideSample {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    /// Calendar date string as reported by the API
    pub calendar_date: String,
    /// Tide height in meters relative to the station datum
    pub height_meters: f64,
}

/// Whether an extreme is a local maximum or minimum of the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremeKind {
    /// High water
    High,
    /// Low water
    Low,
}

impl std::fmt::Display for ExtremeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtremeKind::High => write!(f, "High"),
            ExtremeKind::Low => write!(f, "Low"),
        }
    }
}

/// A labeled local maximum or minimum of the tide curve.
///
/// The upstream labeling is trusted as-is; no alternation between
/// consecutive extremes is enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideExtreme {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    /// Calendar date string as reported by the API
    pub calendar_date: String,
    /// Tide height in meters relative to the station datum
    pub height_meters: f64,
    /// High or low water
    pub kind: ExtremeKind,
}

/// Optional response metadata the API may attach to a report.
///
/// Every field is optional and absence is never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// API credit usage for this call
    pub call_count: Option<u64>,
    /// Attribution string required by the data provider
    pub attribution: Option<String>,
    /// Coordinate as requested
    pub request_coordinate: Option<Coordinate>,
    /// Coordinate of the station/grid point actually answered for
    pub response_coordinate: Option<Coordinate>,
    /// Name of the tide atlas the data came from
    pub source_name: Option<String>,
}

impl ReportMeta {
    /// True when the response carried none of the optional fields.
    pub fn is_empty(&self) -> bool {
        self.call_count.is_none()
            && self.attribution.is_none()
            && self.request_coordinate.is_none()
            && self.response_coordinate.is_none()
            && self.source_name.is_none()
    }
}

/// The unit returned to callers: one day of tide data for one coordinate.
///
/// Constructed fresh per request and immutable once returned. `samples` is
/// non-empty and chronologically ordered whenever `status == 200`.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use tide_times_lib::mock;
///
/// let report = mock::synthetic(Utc::now());
/// assert_eq!(report.status, 200);
/// assert_eq!(report.samples.len(), 25);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideReport {
    /// Application-level status, 200 on success
    pub status: i64,
    /// Tide curve samples in chronological order
    pub samples: Vec<TideSample>,
    /// High/low extremes in chronological order
    pub extremes: Vec<TideExtreme>,
    /// Optional response metadata, `None` when the body carried none
    pub meta: Option<ReportMeta>,
}

impl TideReport {
    /// Scale every sample height into [0, 1] for charting.
    ///
    /// Uses (h - min) / (max - min) over the report's own samples. A flat
    /// curve maps every sample to 0.5 rather than dividing by zero.
    pub fn normalized_heights(&self) -> Vec<f64> {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.height_meters), hi.max(s.height_meters))
            });

        let range = max - min;
        self.samples
            .iter()
            .map(|s| {
                if range > f64::EPSILON {
                    (s.height_meters - min) / range
                } else {
                    0.5
                }
            })
            .collect()
    }

    /// The first sample at or after the given instant, for the live "now"
    /// indicator. `None` once the instant is past the end of the window.
    pub fn sample_nearest(&self, now_epoch: f64) -> Option<&TideSample> {
        self.samples.iter().find(|s| s.timestamp >= now_epoch)
    }
}
