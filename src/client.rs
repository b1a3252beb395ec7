//! # WorldTides Data Fetching and Validation
//!
//! This module handles all network operations for fetching tide predictions
//! from the WorldTides API. One call fetches one day of heights and extremes
//! for one coordinate; there is no retry loop, no request batching and no
//! on-disk cache, so every failure is terminal for the current call and is
//! reported upward as a single classified [`TideError`].
//!
//! ## Data Source
//!
//! - **Endpoint**: `GET {base}?heights&extremes&lat={lat}&lon={lon}&date={date}&days=1&key={key}`
//! - **Format**: JSON object with `status`, `heights` and `extremes` arrays,
//!   plus optional accounting/attribution fields
//! - **Errors**: `{status: <non-200>, error?: string}`
//!
//! ## Validation Pipeline
//!
//! 1. **Build**: encode coordinate and today's date into the request target
//! 2. **Execute**: one HTTP round-trip on the shared client
//! 3. **Application status**: inspect the body's `status` field before
//!    anything else; a non-200 value wins over both decode errors and the
//!    raw HTTP status, so an upstream error body is never masked
//! 4. **Transport status**: non-success HTTP with no application verdict is
//!    an invalid response
//! 5. **Decode**: strict decode into the wire shape; a `status: 200` body
//!    missing required fields is a decoding failure, never an empty success
//!
//! In mock mode the pipeline is skipped entirely and a deterministic
//! synthetic report is served; that path cannot fail.

use crate::config::Config;
use crate::{mock, Coordinate, ExtremeKind, ReportMeta, TideExtreme, TideReport, TideSample};
use chrono::{Local, NaiveDate, Utc};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching and normalizing tide data.
///
/// Classified, not generic: callers branch on the kind, and the rendered
/// message is what the user sees.
#[derive(Debug, Error)]
pub enum TideError {
    /// Coordinate/date/credential could not be encoded into a request target
    #[error("invalid request target")]
    InvalidRequest,

    /// Network-level failure (DNS, connection, timeout, TLS, body read)
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport succeeded but the response is not a well-formed success
    #[error("invalid response from server")]
    InvalidResponse,

    /// Upstream reported a non-200 application status with a message,
    /// surfaced verbatim
    #[error("{0}")]
    Api(String),

    /// Upstream reported a non-200 application status with no message
    #[error("server error: {0}")]
    Server(i64),

    /// Body does not match the expected structure
    #[error("could not decode the tide data")]
    Decoding(#[source] serde_json::Error),

    /// Decode succeeded but the sample set is empty
    #[error("no tide data available for this location")]
    NoDataAvailable,

    /// Upstream signalled credential/usage exhaustion
    #[error("API quota exceeded")]
    QuotaExceeded,
}

/// Client for the WorldTides API.
///
/// Holds its configuration (endpoint, credential, mock flag) explicitly; no
/// process-wide state, so parallel instances with different configurations
/// are fine. Each fetch is independent and shares no mutable buffers.
pub struct TideClient {
    http: reqwest::Client,
    base_url: String,
    credential: Option<String>,
    use_mock_data: bool,
}

impl TideClient {
    /// Build a client from configuration.
    ///
    /// The underlying HTTP client gets an explicit request timeout
    /// (`api.timeout_secs`) rather than inheriting the transport default.
    pub fn new(config: &Config) -> Result<Self, TideError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(TideClient {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            credential: config.api.resolve_key(),
            use_mock_data: config.api.use_mock_data,
        })
    }

    /// Encode a coordinate and date into the request target.
    ///
    /// The `heights` and `extremes` flags are bare query keys, so the target
    /// is assembled as a string and parsed once at the end.
    pub fn request_url(&self, coordinate: Coordinate, date: NaiveDate) -> Result<Url, TideError> {
        let key = match self.credential.as_deref() {
            Some(key) => key,
            None => {
                tracing::warn!("no API credential configured, cannot build request");
                return Err(TideError::InvalidRequest);
            }
        };

        let target = format!(
            "{}?heights&extremes&lat={}&lon={}&date={}&days=1&key={}",
            self.base_url,
            coordinate.latitude,
            coordinate.longitude,
            date.format("%Y-%m-%d"),
            key
        );

        Url::parse(&target).map_err(|_| TideError::InvalidRequest)
    }

    /// Fetch one day of tide data for a coordinate, starting today.
    ///
    /// In mock mode this returns a synthetic report without touching the
    /// network and never fails. Otherwise it runs the full validation
    /// pipeline described in the module docs. No retries: the caller decides
    /// what a transport failure means for it.
    pub async fn fetch_tide_data(&self, coordinate: Coordinate) -> Result<TideReport, TideError> {
        if self.use_mock_data {
            tracing::debug!("mock mode active, serving synthetic tide data");
            return Ok(mock::synthetic_for(coordinate, Utc::now()));
        }

        let today = Local::now().date_naive();
        let url = self.request_url(coordinate, today)?;
        tracing::debug!(%url, "fetching tide data");

        let response = self.http.get(url).send().await?;
        let http_status = response.status();
        let body = response.text().await?;

        // Application-level verdict wins over the raw HTTP status: upstream
        // reports errors as {status, error?} bodies on 4xx responses too.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(status) = value.get("status").and_then(|s| s.as_i64()) {
                if status != 200 {
                    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
                        return Err(TideError::Api(message.to_string()));
                    }
                    return Err(TideError::Server(status));
                }
            }
        }

        if !http_status.is_success() {
            tracing::error!(status = %http_status, "unexpected transport status");
            return Err(TideError::InvalidResponse);
        }

        let wire: WireReport = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, body = %body, "tide response failed strict decode");
            TideError::Decoding(e)
        })?;

        Ok(wire.into_report())
    }

    /// Fetch and additionally classify reports the caller cannot use.
    ///
    /// Thin layer over [`fetch_tide_data`](Self::fetch_tide_data): an
    /// `Api` error matching the upstream quota message becomes
    /// [`TideError::QuotaExceeded`], and a decoded report with no samples
    /// becomes [`TideError::NoDataAvailable`].
    pub async fn fetch_usable_tides(
        &self,
        coordinate: Coordinate,
    ) -> Result<TideReport, TideError> {
        match self.fetch_tide_data(coordinate).await {
            Ok(report) if report.samples.is_empty() => Err(TideError::NoDataAvailable),
            Ok(report) => Ok(report),
            Err(TideError::Api(message)) if is_quota_message(&message) => {
                Err(TideError::QuotaExceeded)
            }
            Err(other) => Err(other),
        }
    }
}

/// Upstream phrases its exhaustion messages around "quota"
fn is_quota_message(message: &str) -> bool {
    message.to_ascii_lowercase().contains("quota")
}

// -- Wire format --

/// Response body as the API ships it. `heights` and `extremes` are required;
/// everything else is accounting/attribution and may be absent.
#[derive(Debug, Deserialize)]
struct WireReport {
    status: i64,
    heights: Vec<WireHeight>,
    extremes: Vec<WireExtreme>,
    call_count: Option<u64>,
    copyright: Option<String>,
    request_lat: Option<f64>,
    request_lon: Option<f64>,
    response_lat: Option<f64>,
    response_lon: Option<f64>,
    atlas: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireHeight {
    dt: f64,
    date: String,
    height: f64,
}

#[derive(Debug, Deserialize)]
struct WireExtreme {
    dt: f64,
    date: String,
    height: f64,
    #[serde(rename = "type")]
    kind: WireKind,
}

/// Extreme labels as strings on the wire; anything other than High/Low is a
/// structural mismatch and fails the strict decode.
#[derive(Debug, Deserialize)]
enum WireKind {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl From<WireKind> for ExtremeKind {
    fn from(kind: WireKind) -> Self {
        match kind {
            WireKind::High => ExtremeKind::High,
            WireKind::Low => ExtremeKind::Low,
        }
    }
}

fn coordinate_from(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinate> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Some(Coordinate {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

impl WireReport {
    fn into_report(self) -> TideReport {
        let meta = ReportMeta {
            call_count: self.call_count,
            attribution: self.copyright,
            request_coordinate: coordinate_from(self.request_lat, self.request_lon),
            response_coordinate: coordinate_from(self.response_lat, self.response_lon),
            source_name: self.atlas,
        };

        TideReport {
            status: self.status,
            samples: self
                .heights
                .into_iter()
                .map(|h| TideSample {
                    timestamp: h.dt,
                    calendar_date: h.date,
                    height_meters: h.height,
                })
                .collect(),
            extremes: self
                .extremes
                .into_iter()
                .map(|e| TideExtreme {
                    timestamp: e.dt,
                    calendar_date: e.date,
                    height_meters: e.height,
                    kind: e.kind.into(),
                })
                .collect(),
            meta: if meta.is_empty() { None } else { Some(meta) },
        }
    }
}
