//! Shared fixtures for the integration tests.
//!
//! Provides a canned [`MetricsSource`], a one-shot HTTP server standing in
//! for the reporting API, and sample reports.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use chrono::{Local, NaiveDate, TimeZone};
use hotel_reports::models::{RawMetrics, RawRecord};
use hotel_reports::normalize::normalize;
use hotel_reports::{DateRange, MetricsSource, Report, ReportError, Result};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

pub fn record(bookings: i64, gmv: f64, gross: f64) -> RawRecord {
    RawRecord {
        no_of_booking: Some(bookings),
        total_book_price: Some(gmv),
        gross: Some(gross),
    }
}

/// The single entry used by the three-day scenario.
pub fn scenario_a_raw() -> RawMetrics {
    RawMetrics::from([("2024-01-01".to_string(), record(5, 1250.0, 1100.0))])
}

/// A report over 2024-01-01..=2024-01-03 with one populated day.
pub fn scenario_a_report() -> Report {
    let range = range("2024-01-01", "2024-01-03");
    let series = normalize(&range, &scenario_a_raw());
    Report::new(42, range, series, fixed_timestamp())
}

pub fn fixed_timestamp() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap()
}

// ---------------------------------------------------------------------------
// StubSource
// ---------------------------------------------------------------------------

/// A metrics source returning canned data and counting calls.
pub struct StubSource {
    response: std::result::Result<RawMetrics, String>,
    calls: Cell<usize>,
}

impl StubSource {
    pub fn ok(data: RawMetrics) -> Self {
        Self {
            response: Ok(data),
            calls: Cell::new(0),
        }
    }

    pub fn malformed(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MetricsSource for StubSource {
    fn fetch(&self, _space_id: u64, _range: &DateRange) -> Result<RawMetrics> {
        self.calls.set(self.calls.get() + 1);
        match &self.response {
            Ok(data) => Ok(data.clone()),
            Err(message) => Err(ReportError::MalformedResponse(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// StubServer
// ---------------------------------------------------------------------------

/// Serves exactly one HTTP response on a random local port.
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    pub fn respond(status: u16, reason: &str, body: &str) -> Self {
        Self::raw(format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        ))
    }

    /// Write `response` verbatim, then close the connection.
    pub fn raw(response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        Self { base_url, handle }
    }

    pub fn json(body: serde_json::Value) -> Self {
        Self::respond(200, "OK", &body.to_string())
    }

    /// The raw request the server received.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// A local URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
