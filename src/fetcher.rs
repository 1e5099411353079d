//! Single-shot download of daily metrics from the revenue-and-count endpoint.
//!
//! One GET per run, no retries. The JSON envelope is checked here and the
//! `Data` object is turned into typed [`RawRecord`]s before anything else sees
//! it.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::models::{RawMetrics, RawRecord};
use crate::range::{date_key, DateRange};

/// Longest response body kept in an [`ReportError::Http`].
pub const BODY_SNIPPET_CHARS: usize = 200;

/// Anything that can supply the raw per-date entries for a space.
pub trait MetricsSource {
    fn fetch(&self, space_id: u64, range: &DateRange) -> Result<RawMetrics>;
}

// ---------------------------------------------------------------------------
// MetricsFetcher
// ---------------------------------------------------------------------------

/// Fetches daily metrics over HTTP.
pub struct MetricsFetcher {
    config: ReportConfig,
    client: Client,
}

impl MetricsFetcher {
    /// Create a fetcher with its own HTTP client.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(ReportError::Network)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }
}

impl MetricsSource for MetricsFetcher {
    fn fetch(&self, space_id: u64, range: &DateRange) -> Result<RawMetrics> {
        let url = self.config.endpoint();
        info!(%url, space_id, %range, "fetching daily metrics");

        let mut request = self.client.get(&url).query(&[
            ("space_id", space_id.to_string()),
            ("start_date", date_key(range.start())),
            ("end_date", date_key(range.end())),
        ]);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let resp = request.send().map_err(ReportError::Network)?;
        let status = resp.status().as_u16();

        if status >= 400 {
            // The status alone decides the category; an unreadable body is
            // reported as empty.
            let body = resp.text().unwrap_or_default();
            return Err(ReportError::Http {
                status,
                body: snippet(&body, BODY_SNIPPET_CHARS),
            });
        }

        let body = resp.text().map_err(ReportError::Network)?;
        let data = parse_envelope(&body)?;
        debug!(entries = data.len(), "received daily metrics");
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// Envelope parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Success")]
    success: Option<bool>,
    #[serde(rename = "Data")]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse a response body of the form `{"Success": true, "Data": {...}}`.
///
/// Anything else (unparseable body, `Success` missing or false, `Data`
/// missing or not an object, non-numeric fields) is a
/// [`ReportError::MalformedResponse`].
pub fn parse_envelope(body: &str) -> Result<RawMetrics> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
        ReportError::MalformedResponse(format!("response is not a JSON envelope: {}", e))
    })?;

    match envelope.success {
        Some(true) => {}
        Some(false) => {
            return Err(ReportError::MalformedResponse(format!(
                "API reported failure: {}",
                envelope.message.as_deref().unwrap_or("Unknown error")
            )))
        }
        None => {
            return Err(ReportError::MalformedResponse(
                "missing 'Success' field".to_string(),
            ))
        }
    }

    let data = match envelope.data {
        Some(serde_json::Value::Object(map)) => map,
        Some(other) => {
            return Err(ReportError::MalformedResponse(format!(
                "'Data' is not an object: {}",
                other
            )))
        }
        None => {
            return Err(ReportError::MalformedResponse(
                "missing 'Data' field".to_string(),
            ))
        }
    };

    data.into_iter()
        .map(|(date, entry)| {
            let record = serde_json::from_value::<RawRecord>(entry).map_err(|e| {
                ReportError::MalformedResponse(format!("bad entry for {}: {}", date, e))
            })?;
            Ok((date, record))
        })
        .collect()
}

/// First `max_chars` characters of `body`, marked when cut.
fn snippet(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
